//! BitReader: reads a packed bitstream one bit at a time, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::Read;

use crate::error::HuffError;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads bits from packed data.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
    /// Bits handed out so far.
    consumed: usize,
    /// Number of meaningful bits in the source. None reads to the end of the source.
    limit: Option<usize>,
}

impl<R: Read> BitReader<R> {
    /// Creates a bitReader that stops after bit_len bits. Everything after that (the zero
    /// padding of the last byte) is never looked at.
    pub fn new(source: R, bit_len: usize) -> Self {
        Self::with_limit(source, Some(bit_len))
    }

    /// Creates a bitReader that reads every bit of the source, padding included.
    pub fn unbounded(source: R) -> Self {
        Self::with_limit(source, None)
    }

    fn with_limit(source: R, limit: Option<usize>) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
            consumed: 0,
            limit,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> Result<bool, HuffError> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.truncate(0);
                self.cursor = 0;
                return Ok(false);
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            // Reset the cursor and bit index
            self.cursor = 0;
            self.bit_index = 0;
        }
        Ok(true)
    }

    /// Return the next bit (1 or 0), or None once all meaningful bits are read. A source
    /// that ends before the bit limit is reached is reported as a truncated stream.
    pub fn bit(&mut self) -> Result<Option<u8>, HuffError> {
        if self.limit == Some(self.consumed) {
            return Ok(None);
        }
        // If bit_index is == 0, check if we have a byte to read.
        if self.bit_index == 0 && !self.have_data()? {
            return match self.limit {
                Some(_) => Err(HuffError::TruncatedOrCorruptStream),
                None => Ok(None),
            };
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        self.consumed += 1;
        Ok(Some(bit))
    }

    /// Check that nothing follows the meaningful bits except the padding of their last byte.
    /// Consumes the reader; leftover bytes mean the bit length and the data disagree.
    pub fn finish(mut self) -> Result<(), HuffError> {
        // Bytes still sitting in the buffer after the current (partly read) byte.
        let start = if self.bit_index == 0 {
            self.cursor
        } else {
            self.cursor + 1
        };
        let buffered = self.buffer.len().saturating_sub(start);
        let mut peek = [0_u8; 1];
        let more = loop {
            match self.source.read(&mut peek) {
                Ok(size) => break size,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        if buffered + more > 0 {
            return Err(HuffError::TruncatedOrCorruptStream);
        }
        Ok(())
    }

    /// Number of bits read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.consumed / 8, self.consumed % 8)
    }
}

impl<R: Read> Iterator for BitReader<R> {
    type Item = Result<u8, HuffError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.bit().transpose()
    }
}
