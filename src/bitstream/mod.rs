//! The bitstream module is the bit-level I/O layer of huffpack.
//!
//! Codes are written with the BitPacker, which queues bits and pushes out whole bytes most
//! significant bit first, padding the last byte with zeros. The BitReader does the reverse
//! and knows how many bits are meaningful, so the padding is never mistaken for data.
//!
pub mod bitpacker;
pub mod bitreader;
