use log::error;

use crate::huffman_coding::code_table::Code;

/// Packs bits into bytes, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of zero bits added to the last byte by flush().
    pub padding: u8,
    queue: u64,
    q_bits: u8,
    written: usize,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to
    /// push the last partial byte to the buffer before using the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            padding: 0,
            queue: 0,
            q_bits: 0,
            written: 0,
        }
    }

    /// Internal bitstream write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit (0 or 1) on the stream.
    pub fn out_bit(&mut self, bit: u8) {
        self.queue = (self.queue << 1) | (bit & 1) as u64;
        self.q_bits += 1;
        self.written += 1;
        self.write_stream();
    }

    /// Puts all bits of a code on the stream, first bit first.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Puts a byte of pre-packed binary data on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.written += 8;
        self.write_stream();
    }

    /// Number of bits put on the stream so far, padding excluded.
    pub fn bit_len(&self) -> usize {
        self.written
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.padding = 8 - self.q_bits;
            self.queue <<= self.padding; //pad the queue with zeros
            self.q_bits += self.padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        } else {
            self.padding = 0;
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]", self.written / 8, self.written % 8}
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;

    #[test]
    fn out8_test() {
        let mut bw = BitPacker::new(100);
        bw.out8(b'!');
        bw.out8(b' ');
        bw.flush();
        assert_eq!(bw.output, "! ".as_bytes());
        assert_eq!(bw.padding, 0);
        assert_eq!(bw.bit_len(), 16);
    }

    #[test]
    fn out_bit_and_loc_test() {
        let mut bw = BitPacker::new(100);
        for bit in [1, 0, 1, 0, 0, 1] {
            bw.out_bit(bit);
        }
        assert!(bw.output.is_empty());
        assert_eq!("[0.6]", &bw.loc());
        bw.flush();
        assert_eq!(bw.output, [0b1010_0100]);
        assert_eq!(bw.padding, 2);
        assert_eq!(bw.bit_len(), 6);
    }

    #[test]
    fn out_code_test() {
        let mut bw = BitPacker::new(100);
        bw.out_code(&"0000".parse().unwrap());
        bw.out_code(&"0001".parse().unwrap());
        bw.out_code(&"001".parse().unwrap());
        bw.flush();
        assert_eq!(bw.output, [1, 32]);
        assert_eq!(bw.bit_len(), 11);
        assert_eq!("[1.3]", &bw.loc());
    }

    #[test]
    fn mixed_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bit(1);
        bw.out8(0xff);
        bw.flush();
        assert_eq!(bw.output, [0xff, 0x80]);
        assert_eq!(bw.padding, 7);
    }

    #[test]
    fn empty_flush_test() {
        let mut bw = BitPacker::new(0);
        bw.flush();
        assert!(bw.output.is_empty());
        assert_eq!(bw.bit_len(), 0);
    }
}
