//! Huffman coding of text.
//!
//! Version 0.1.0
//!
//! Builds a prefix free code from symbol weights and uses it to pack text losslessly. A symbol
//! is a single char. The weights come from a `symbol;weight` table, or are counted from the
//! text itself.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpack -w freq.txt original.txt`
//!
//! This will write original.txt.huf. Unpacking needs the same weights:
//!
//! `$> huffpack -d -w freq.txt original.txt.huf`
//!
//! As a library:
//!
//! ```
//! use huffpack::huffman_coding::{code_table::CodeTable, codec, forest::build_tree};
//!
//! let root = build_tree(&[('a', 0.5), ('b', 0.25), ('c', 0.25)]).unwrap();
//! let table = CodeTable::from_tree(&root);
//! let packed = codec::encode(&table, "abcab".chars()).unwrap();
//! let text: String = codec::decode(&root, &packed).unwrap().into_iter().collect();
//! assert_eq!(text, "abcab");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
