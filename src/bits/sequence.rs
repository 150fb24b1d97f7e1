/// Growable, randomly addressable sequence of bits
///
/// Bit 0 is the first bit a Brotli decoder consumes. Bits are packed
/// LSB-first within each byte, so a sequence built from a byte buffer
/// exports back to the same bytes.
///
/// Storage bits at or beyond `len` are always zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self { bytes: Vec::new(), len: 0 }
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { bytes: Vec::with_capacity(bits.div_ceil(8)), len: 0 }
    }

    /// Build a sequence of `bytes.len() * 8` bits
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { bytes: bytes.to_vec(), len: bytes.len() * 8 }
    }

    /// Number of bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`
    ///
    /// # Panics
    /// If `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {} out of range for length {}", index, self.len);
        (self.bytes[index / 8] >> (index % 8)) & 1 != 0
    }

    /// Write bit `index`
    ///
    /// # Panics
    /// If `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize, bit: bool) {
        assert!(index < self.len, "bit index {} out of range for length {}", index, self.len);
        let mask = 1u8 << (index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Append one bit at the end
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, bit);
    }

    /// Change the length. Truncating drops the highest-indexed bits,
    /// extending appends `false` bits.
    pub fn set_len(&mut self, len: usize) {
        if len < self.len {
            self.bytes.truncate(len.div_ceil(8));
            let partial = len % 8;
            if partial != 0 {
                if let Some(last) = self.bytes.last_mut() {
                    *last &= (1u8 << partial) - 1;
                }
            }
        } else {
            // Tail bits are already zero, so growth only adds zeroed bytes
            self.bytes.resize(len.div_ceil(8), 0);
        }
        self.len = len;
    }

    /// Remove the first `n` bits, moving every later bit down by `n`.
    /// The length is unchanged; the vacated trailing bits become `false`.
    pub fn shift_left(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        if n >= self.len {
            self.bytes.iter_mut().for_each(|b| *b = 0);
            return;
        }

        let byte_shift = n / 8;
        let bit_shift = (n % 8) as u32;
        for i in 0..self.bytes.len() {
            let lo = self.bytes.get(i + byte_shift).copied().unwrap_or(0);
            self.bytes[i] = if bit_shift == 0 {
                lo
            } else {
                let hi = self.bytes.get(i + byte_shift + 1).copied().unwrap_or(0);
                (lo >> bit_shift) | (hi << (8 - bit_shift))
            };
        }
    }

    /// Whether the first `prefix.len()` bits equal `prefix`
    pub fn starts_with(&self, prefix: &BitSequence) -> bool {
        prefix.len <= self.len && (0..prefix.len).all(|i| self.get(i) == prefix.get(i))
    }

    /// Index of the highest-indexed `true` bit, if any
    pub fn last_set_bit(&self) -> Option<usize> {
        self.bytes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &b)| b != 0)
            .map(|(i, &b)| i * 8 + 7 - b.leading_zeros() as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Export as bytes, bit `i` landing at bit `i % 8` of byte `i / 8`
    ///
    /// # Panics
    /// If the length is not a multiple of 8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.assert_byte_aligned();
        self.bytes.clone()
    }

    /// Consuming form of [`BitSequence::to_bytes`]
    pub fn into_bytes(self) -> Vec<u8> {
        self.assert_byte_aligned();
        self.bytes
    }

    fn assert_byte_aligned(&self) {
        assert!(
            self.len % 8 == 0,
            "cannot export a {}-bit sequence to bytes: length is not byte aligned",
            self.len
        );
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<bool> for BitSequence {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_lsb_first() {
        let bits = BitSequence::from_bytes(&[0b1011_0001]);
        assert_eq!(bits.len(), 8);
        let expected = [true, false, false, false, true, true, false, true];
        assert_eq!(bits.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_set_and_export() {
        let mut bits = BitSequence::from_bytes(&[0x00, 0x00]);
        bits.set(0, true);
        bits.set(9, true);
        bits.set(15, true);
        assert_eq!(bits.to_bytes(), vec![0x01, 0x82]);

        bits.set(15, false);
        assert_eq!(bits.to_bytes(), vec![0x01, 0x02]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        let bits = BitSequence::from_bytes(&[0xFF]);
        bits.get(8);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range() {
        let mut bits = BitSequence::new();
        bits.set(0, true);
    }

    #[test]
    fn test_truncate_clears_dropped_bits() {
        let mut bits = BitSequence::from_bytes(&[0xFF, 0xFF]);
        bits.set_len(5);
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.last_set_bit(), Some(4));

        // Regrowing must not resurrect the dropped bits
        bits.set_len(16);
        assert_eq!(bits.to_bytes(), vec![0x1F, 0x00]);
    }

    #[test]
    fn test_extend_fills_false() {
        let mut bits = BitSequence::from_bytes(&[0xAB]);
        bits.set_len(24);
        assert_eq!(bits.to_bytes(), vec![0xAB, 0x00, 0x00]);
    }

    #[test]
    fn test_shift_left_by_bits() {
        // 0xD3 0xAA shifted by 3: drop the low three bits of the first byte
        let mut bits = BitSequence::from_bytes(&[0xD3, 0xAA]);
        bits.shift_left(3);
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.to_bytes(), vec![0x5A, 0x15]);
    }

    #[test]
    fn test_shift_left_by_whole_bytes() {
        let mut bits = BitSequence::from_bytes(&[0x01, 0x02, 0x03]);
        bits.shift_left(8);
        assert_eq!(bits.to_bytes(), vec![0x02, 0x03, 0x00]);
    }

    #[test]
    fn test_shift_left_past_end() {
        let mut bits = BitSequence::from_bytes(&[0xFF, 0xFF]);
        bits.shift_left(40);
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.last_set_bit(), None);
    }

    #[test]
    fn test_shift_respects_truncated_tail() {
        let mut bits = BitSequence::from_bytes(&[0xFF, 0xFF]);
        bits.set_len(12);
        bits.shift_left(4);
        assert_eq!(bits.iter().filter(|&b| b).count(), 8);
        assert_eq!(bits.last_set_bit(), Some(7));
    }

    #[test]
    fn test_last_set_bit() {
        assert_eq!(BitSequence::new().last_set_bit(), None);
        assert_eq!(BitSequence::from_bytes(&[0x00, 0x00]).last_set_bit(), None);
        assert_eq!(BitSequence::from_bytes(&[0x01, 0x00]).last_set_bit(), Some(0));
        assert_eq!(BitSequence::from_bytes(&[0x00, 0x03, 0x00]).last_set_bit(), Some(9));
        assert_eq!(BitSequence::from_bytes(&[0x00, 0x80]).last_set_bit(), Some(15));
    }

    #[test]
    fn test_push_and_collect() {
        let bits: BitSequence = [true, true, false, true].into_iter().collect();
        assert_eq!(bits.len(), 4);
        assert!(bits.get(3));
        assert!(!bits.get(2));
    }

    #[test]
    fn test_starts_with() {
        let prefix: BitSequence = [true, true, false, true].into_iter().collect();
        assert!(BitSequence::from_bytes(&[0x6B]).starts_with(&prefix));
        assert!(!BitSequence::from_bytes(&[0x63]).starts_with(&prefix));
        assert!(!BitSequence::new().starts_with(&prefix));
    }

    #[test]
    #[should_panic(expected = "not byte aligned")]
    fn test_export_unaligned_panics() {
        let mut bits = BitSequence::from_bytes(&[0xFF]);
        bits.set_len(7);
        bits.to_bytes();
    }
}
