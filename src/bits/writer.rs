/// Bit-level writer for synthesized meta-block headers
///
/// Writes bits LSB-first to match the Brotli bit order.
pub struct BitWriter {
    /// Accumulated output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { output: Vec::new(), current_byte: 0, bits_in_byte: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0 }
    }

    /// Write `n` bits (0-32) from value in LSB-first order
    pub fn write_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32);

        if n == 0 {
            return;
        }

        let mut val = value as u64;
        let mut remaining = n;

        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            let mask = (1u64 << to_write) - 1;
            self.current_byte |= ((val & mask) as u8) << self.bits_in_byte;

            val >>= to_write;
            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.output.push(self.current_byte);
                self.current_byte = 0;
                self.bits_in_byte = 0;
            }
        }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Pad to byte boundary with zero bits
    pub fn align_to_byte(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bits_in_byte == 0 {
            self.output.extend_from_slice(bytes);
        } else {
            // Not aligned, write through bits
            for &b in bytes {
                self.write_bits(b as u32, 8);
            }
        }
    }

    /// Finish and return the output bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b011, 3); // bits 0-2
        writer.write_bits(0b11010, 5); // bits 3-7
        let output = writer.finish();
        assert_eq!(output, vec![0xD3]); // 11010_011 = 0xD3
    }

    #[test]
    fn test_write_cross_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFFF, 12);
        let output = writer.finish();
        assert_eq!(output, vec![0xFF, 0x0F]);
    }

    #[test]
    fn test_write_full_width() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xDEAD_BEEF, 32);
        assert_eq!(writer.finish(), vec![0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn test_write_bytes_unaligned() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.write_bytes(&[0xFF]);
        assert_eq!(writer.finish(), vec![0xFF, 0x01]);
    }

    #[test]
    fn test_align_then_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.align_to_byte();
        writer.write_bytes(b"ab");
        assert_eq!(writer.finish(), vec![0x05, b'a', b'b']);
    }
}
