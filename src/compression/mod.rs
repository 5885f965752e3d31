//! The compression module manages files for huffpack.
//!
//! Compression happens in the following steps:
//! - Symbol weights are read from a weights file, or counted from the input.
//! - The forest merges the weights into a huffman tree, and the tree gives the code table.
//! - Every char of the input is replaced by its code, and the codes are packed into bytes.
//! - The packed bytes are written behind a small header that records how many bits count.
//!
//! Decompression reads the header, rebuilds the same tree from the same weights, and walks the
//! tree bit by bit until the recorded number of bits is used up.
//!
//! Test mode does both in memory and compares the result with the original.
//!

pub mod compress;
pub mod container;
pub mod decompress;
