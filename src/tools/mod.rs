//! The tools module provides the helpers around the huffman core.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - freq_count: Count symbol frequencies of a text.
//! - freq_table: Read and write `symbol;weight` tables.
//!
pub mod cli;
pub mod freq_count;
pub mod freq_table;
