use super::constants::EMPTY_META_BLOCK_BITS;
use crate::bits::BitSequence;

/// Close the stream content with an empty, non-final metadata meta-block
/// and zero-fill to the next byte boundary.
///
/// This is the only way to reach a byte boundary without changing the
/// decoded output. Already aligned sequences are left untouched.
pub fn pad_to_byte_boundary(bits: &mut BitSequence) {
    let end = bits.len();
    if end % 8 == 0 {
        return;
    }

    let padded_len = (end + EMPTY_META_BLOCK_BITS.len()).div_ceil(8) * 8;
    bits.set_len(padded_len);
    for (offset, &bit) in EMPTY_META_BLOCK_BITS.iter().enumerate() {
        bits.set(end + offset, bit);
    }
}
