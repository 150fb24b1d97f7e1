use super::constants::{MAX_STORED_BLOCK_LEN, STREAM_TERMINATOR};
use super::header::StreamHeader;
use crate::bits::BitWriter;

/// Meta-block header bytes for one uncompressed block (20 bits, padded)
const STORED_BLOCK_HEADER_LEN: usize = 3;

/// Wrap `data` as a byte-aligned stream of uncompressed meta-blocks
///
/// Output is `header ++ stored blocks ++ terminator`, which is always
/// extractable with the same header.
pub fn encode_stored(data: &[u8], header: &StreamHeader) -> Vec<u8> {
    let blocks = data.len().div_ceil(MAX_STORED_BLOCK_LEN);
    let capacity = header.as_bytes().len() + data.len() + blocks * STORED_BLOCK_HEADER_LEN + 1;

    let mut writer = BitWriter::with_capacity(capacity);
    writer.write_bytes(header.as_bytes());
    for chunk in data.chunks(MAX_STORED_BLOCK_LEN) {
        write_stored_block(&mut writer, chunk);
    }
    writer.write_bytes(&[STREAM_TERMINATOR]);
    writer.finish()
}

/// ISLAST=0, MNIBBLES=4, MLEN-1, ISUNCOMPRESSED=1, pad, raw bytes
fn write_stored_block(writer: &mut BitWriter, chunk: &[u8]) {
    debug_assert!(!chunk.is_empty() && chunk.len() <= MAX_STORED_BLOCK_LEN);

    writer.write_bit(false);
    writer.write_bits(0, 2);
    writer.write_bits((chunk.len() - 1) as u32, 16);
    writer.write_bit(true);
    writer.align_to_byte();
    writer.write_bytes(chunk);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::extract::try_extract_bare_aligned_block;

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_stored(&[], StreamHeader::canonical()), vec![0x6b, 0x00, 0x03]);
    }

    #[test]
    fn test_encode_small() {
        let stream = encode_stored(b"hello", StreamHeader::canonical());
        // MLEN-1 = 4 at bits 3-18, ISUNCOMPRESSED at bit 19
        assert_eq!(stream[..5], [0x6b, 0x00, 0x20, 0x00, 0x08]);
        assert_eq!(&stream[5..10], b"hello");
        assert_eq!(stream[10], 0x03);
        assert_eq!(stream.len(), 11);
    }

    #[test]
    fn test_encode_full_block() {
        let data = vec![0x5a; MAX_STORED_BLOCK_LEN];
        let stream = encode_stored(&data, StreamHeader::canonical());
        // MLEN-1 = 0xFFFF
        assert_eq!(stream[2..5], [0xf8, 0xff, 0x0f]);
        assert_eq!(stream.len(), 2 + 3 + MAX_STORED_BLOCK_LEN + 1);
    }

    #[test]
    fn test_encode_splits_large_input() {
        let data = vec![0x11; MAX_STORED_BLOCK_LEN + 10];
        let stream = encode_stored(&data, StreamHeader::canonical());
        assert_eq!(stream.len(), 2 + 2 * 3 + data.len() + 1);

        // Second block carries the remaining 10 bytes
        let second = 2 + 3 + MAX_STORED_BLOCK_LEN;
        assert_eq!(stream[second..second + 3], [0x48, 0x00, 0x08]);
    }

    #[test]
    fn test_stored_is_extractable() {
        let stream = encode_stored(b"payload", StreamHeader::canonical());
        let block = try_extract_bare_aligned_block(&stream).unwrap();
        assert_eq!(block, stream[2..stream.len() - 1]);
    }
}
