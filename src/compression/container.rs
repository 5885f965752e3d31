//! On-disk layout of a packed file.
//!
//! | bytes | content                                   |
//! |-------|-------------------------------------------|
//! | 4     | magic `HUFP`                              |
//! | 1     | format version (1)                        |
//! | 8     | number of meaningful bits, big endian u64 |
//! | rest  | packed codes, zero padded to a byte       |
//!
//! The tree is not stored. Whoever unpacks the file needs the same symbol weights.

use std::io::{self, Read, Write};

use log::{debug, error};

use crate::bitstream::bitpacker::BitPacker;
use crate::error::HuffError;
use crate::huffman_coding::codec::PackedBuffer;

pub const MAGIC: &[u8; 4] = b"HUFP";
pub const VERSION: u8 = 1;
pub const HEADER_LEN: usize = 13;

/// Header bytes for a buffer of bit_len bits.
fn header(bit_len: usize) -> Vec<u8> {
    let mut bw = BitPacker::new(HEADER_LEN);
    MAGIC.iter().for_each(|&x| bw.out8(x));
    bw.out8(VERSION);
    (bit_len as u64).to_be_bytes().iter().for_each(|&x| bw.out8(x));
    bw.flush();
    bw.output
}

/// Write header and packed bytes. Returns the number of bytes written.
pub fn write_packed<W: Write>(writer: &mut W, packed: &PackedBuffer) -> Result<usize, HuffError> {
    let head = header(packed.bit_len);
    writer.write_all(&head)?;
    writer.write_all(&packed.bytes)?;
    writer.flush()?;
    debug!(
        "Wrote {} header bytes and {} data bytes.",
        head.len(),
        packed.bytes.len()
    );
    Ok(head.len() + packed.bytes.len())
}

/// Check the header and return the number of meaningful bits that follow.
pub fn read_header<R: Read>(reader: &mut R) -> Result<usize, HuffError> {
    let mut head = [0_u8; HEADER_LEN];
    reader.read_exact(&mut head).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => HuffError::BadHeader("file is too short".to_string()),
        _ => HuffError::Io(e),
    })?;
    if &head[0..4] != MAGIC {
        error!("Missing the HUFP signature.");
        return Err(HuffError::BadHeader("missing signature".to_string()));
    }
    if head[4] != VERSION {
        return Err(HuffError::BadHeader(format!("unknown version {}", head[4])));
    }
    let mut len = [0_u8; 8];
    len.copy_from_slice(&head[5..HEADER_LEN]);
    let bit_len = usize::try_from(u64::from_be_bytes(len))
        .map_err(|_| HuffError::BadHeader("bit length is too large".to_string()))?;
    debug!("Found a valid header for {} bits.", bit_len);
    Ok(bit_len)
}

/// Read header and packed bytes. The byte count must match the bit length in the header.
pub fn read_packed<R: Read>(reader: &mut R) -> Result<PackedBuffer, HuffError> {
    let bit_len = read_header(reader)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    PackedBuffer::new(bytes, bit_len)
}
