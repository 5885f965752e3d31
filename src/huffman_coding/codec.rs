//! Packs symbols into bytes with a code table, and unpacks them again by walking the tree
//! (or the table) one bit at a time.
//!
//! The packed buffer remembers how many of its bits are meaningful. Without that the zero
//! padding of the last byte could walk the decoder into one more symbol whose code starts
//! with zeros.

use std::io::Read;

use log::{debug, trace};

use super::code_table::{Code, CodeTable};
use super::node::Node;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::HuffError;

/// Packed codes, most significant bit first, zero padded to a whole byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedBuffer {
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in bytes.
    pub bit_len: usize,
}

impl PackedBuffer {
    /// Pair bytes with their bit length. The byte count must be exactly what bit_len needs.
    pub fn new(bytes: Vec<u8>, bit_len: usize) -> Result<Self, HuffError> {
        if bytes.len() != byte_len(bit_len) {
            return Err(HuffError::TruncatedOrCorruptStream);
        }
        Ok(Self { bytes, bit_len })
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Zero bits added after the last meaningful bit.
    pub fn padding(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.bit_len)
    }
}

/// Bytes needed to hold bit_len bits.
pub fn byte_len(bit_len: usize) -> usize {
    bit_len / 8 + usize::from(bit_len % 8 != 0)
}

/// Pack symbols with the code table. Every symbol must have a code, and the code must not
/// be empty (a one symbol alphabet has nothing to write).
pub fn encode<I>(table: &CodeTable, symbols: I) -> Result<PackedBuffer, HuffError>
where
    I: IntoIterator<Item = char>,
{
    let symbols = symbols.into_iter();
    let mut bw = BitPacker::new(symbols.size_hint().0 * table.max_len().max(1) / 8);
    let mut count = 0_usize;
    for symbol in symbols {
        let code = table.get(symbol).ok_or(HuffError::UnknownSymbol(symbol))?;
        if code.is_empty() {
            return Err(HuffError::DegenerateAlphabet(symbol));
        }
        bw.out_code(code);
        count += 1;
    }
    bw.flush();
    debug!(
        "Packed {} symbols into {} bits ({} bytes, {} padding bits).",
        count,
        bw.bit_len(),
        bw.output.len(),
        bw.padding
    );
    Ok(PackedBuffer {
        bit_len: bw.bit_len(),
        bytes: bw.output,
    })
}

/// Unpack a buffer by walking the tree.
pub fn decode(root: &Node, packed: &PackedBuffer) -> Result<Vec<char>, HuffError> {
    if packed.bytes.len() != byte_len(packed.bit_len) {
        return Err(HuffError::TruncatedOrCorruptStream);
    }
    decode_from(root, packed.bytes.as_slice(), packed.bit_len)
}

/// Unpack bit_len bits read from any source by walking the tree. The source must hold
/// exactly byte_len(bit_len) bytes.
pub fn decode_from<R: Read>(root: &Node, source: R, bit_len: usize) -> Result<Vec<char>, HuffError> {
    let mut br = BitReader::new(source, bit_len);
    let mut out = Vec::new();
    let mut node = root;
    for bit in br.by_ref() {
        node = node.child(bit?)?;
        if let Some(symbol) = node.symbol() {
            out.push(symbol);
            node = root;
        }
    }
    // Bits ran out between the root and a leaf.
    if !std::ptr::eq(node, root) {
        trace!("Stream ended mid code at {}", br.loc());
        return Err(HuffError::TruncatedOrCorruptStream);
    }
    debug!("Unpacked {} symbols from {} bits.", out.len(), br.consumed());
    br.finish()?;
    Ok(out)
}

/// Unpack a buffer with the code table instead of the tree.
pub fn decode_with_table(table: &CodeTable, packed: &PackedBuffer) -> Result<Vec<char>, HuffError> {
    if packed.bytes.len() != byte_len(packed.bit_len) {
        return Err(HuffError::TruncatedOrCorruptStream);
    }
    let decoder = table.decoder();
    if let Some(symbol) = decoder.get(&Code::new()) {
        if packed.bit_len > 0 {
            return Err(HuffError::DegenerateAlphabet(*symbol));
        }
    }
    let max_len = table.max_len();
    let mut out = Vec::new();
    let mut code = Code::new();
    for bit in BitReader::new(packed.bytes.as_slice(), packed.bit_len) {
        code.push(bit?);
        if let Some(symbol) = decoder.get(&code) {
            out.push(*symbol);
            code.clear();
        } else if code.len() >= max_len {
            // No code is this long.
            return Err(HuffError::TruncatedOrCorruptStream);
        }
    }
    if !code.is_empty() {
        return Err(HuffError::TruncatedOrCorruptStream);
    }
    Ok(out)
}
