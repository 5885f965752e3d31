//! Error type shared by the huffman core, the bitstream and the file drivers.

use std::fmt::{Display, Formatter};
use std::io;

/// Everything that can go wrong while building codes or packing/unpacking data.
#[derive(Debug)]
pub enum HuffError {
    /// No symbols to build a tree from.
    EmptyInput,
    /// A merge step was asked for a pair while the forest held this many nodes.
    InsufficientElements(usize),
    /// The symbol has no code in the table used for encoding.
    UnknownSymbol(char),
    /// The bit stream ended (or the byte source ran dry) in the middle of a code.
    TruncatedOrCorruptStream,
    /// A traversal bit that is neither 0 nor 1. Indicates a bug upstream.
    InvalidBit(u8),
    /// The alphabet has one symbol, so its code is empty and cannot be packed.
    DegenerateAlphabet(char),
    /// Weights must be finite and not negative.
    InvalidWeight { symbol: char, weight: f64 },
    /// The same symbol was given two weights.
    DuplicateSymbol(char),
    /// A frequency file row could not be parsed. Lines count from 1.
    MalformedRow { line: usize, reason: String },
    /// The compressed file does not start with a valid header.
    BadHeader(String),
    /// Neither a weights file nor --count was given.
    MissingWeights,
    /// Refusing to replace an existing file without --force.
    OutputExists(String),
    /// Test mode decompressed something other than the original.
    Mismatch,
    Io(io::Error),
}

impl Display for HuffError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HuffError::EmptyInput => write!(f, "No symbols to build a tree from"),
            HuffError::InsufficientElements(n) => {
                write!(f, "Need two nodes to merge, the forest holds {}", n)
            }
            HuffError::UnknownSymbol(c) => {
                write!(f, "The code table doesn't contain {:?}", c)
            }
            HuffError::TruncatedOrCorruptStream => {
                write!(f, "Packed data ended in the middle of a code")
            }
            HuffError::InvalidBit(b) => write!(f, "Invalid traversal bit: {}", b),
            HuffError::DegenerateAlphabet(c) => write!(
                f,
                "The alphabet only holds {:?}, its empty code cannot be packed",
                c
            ),
            HuffError::InvalidWeight { symbol, weight } => {
                write!(f, "Invalid weight {} for {:?}", weight, symbol)
            }
            HuffError::DuplicateSymbol(c) => write!(f, "{:?} is listed more than once", c),
            HuffError::MalformedRow { line, reason } => {
                write!(f, "Failed to parse line {}: {}", line, reason)
            }
            HuffError::BadHeader(m) => write!(f, "Not a valid compressed file: {}", m),
            HuffError::MissingWeights => {
                write!(f, "No symbol weights, use --weights <FILE> or --count")
            }
            HuffError::OutputExists(name) => {
                write!(f, "Output file {} already exists, use --force", name)
            }
            HuffError::Mismatch => write!(f, "Original != unpacked"),
            HuffError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HuffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuffError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HuffError {
    fn from(e: io::Error) -> Self {
        HuffError::Io(e)
    }
}

#[cfg(test)]
mod test {
    use super::HuffError;
    use std::error::Error;

    #[test]
    fn display_test() {
        assert_eq!(
            HuffError::UnknownSymbol('z').to_string(),
            "The code table doesn't contain 'z'"
        );
        assert_eq!(
            HuffError::MalformedRow {
                line: 3,
                reason: "no ';'".to_string()
            }
            .to_string(),
            "Failed to parse line 3: no ';'"
        );
    }

    #[test]
    fn io_source_test() {
        let err: HuffError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(HuffError::EmptyInput.source().is_none());
    }
}
