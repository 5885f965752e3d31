//! The huffman module is the core of huffpack.
//!
//! Symbol weights go into the forest, which merges the two lightest nodes over and over until a
//! single tree is left. Walking that tree once gives the code table: frequent symbols end up
//! near the root and get short codes, rare ones get long codes. The codec packs symbols into
//! bytes with the table and unpacks them by walking the tree.
//!
//! Building a tree is deterministic. Ties between equal weights are broken by the order the
//! nodes entered the forest, so the same weights in the same order always give the same codes.
//!

pub mod code_table;
pub mod codec;
pub mod forest;
pub mod node;
