//! Binding to the Brotli entropy coder.
//!
//! Splicing never re-encodes anything; the engine only produces the single
//! block streams that get spliced and decodes the result for verification.

use std::io::Read;

use brotli::enc::BrotliEncoderParams;

use crate::error::{Error, Result};
use crate::stream::{encode_stored, StreamHeader, WindowBits, STREAM_TERMINATOR};
use crate::Quality;

/// Internal buffer size for the streaming decoder
const DECODE_BUFFER_SIZE: usize = 4096;

/// Encode/decode contract of an external Brotli implementation
pub trait BrotliEngine {
    /// Compress `data`. With `byte_align` set, output must be
    /// `header ++ content ++ terminator` with the content starting and
    /// ending on a byte boundary, so that it is extractable.
    fn encode(&self, data: &[u8], quality: Quality, byte_align: bool) -> Result<Vec<u8>>;

    /// Decompress a complete stream
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Engine backed by the `brotli` crate
#[derive(Clone, Copy, Debug, Default)]
pub struct RustBrotli {
    window_bits: WindowBits,
}

impl RustBrotli {
    pub fn new(window_bits: WindowBits) -> Self {
        Self { window_bits }
    }

    pub fn window_bits(&self) -> WindowBits {
        self.window_bits
    }
}

impl RustBrotli {
    fn params(&self, quality: Quality) -> BrotliEncoderParams {
        let mut params = BrotliEncoderParams::default();
        params.quality = quality.level() as i32;
        params.lgwin = self.window_bits.value() as i32;
        params
    }

    fn compress(data: &[u8], params: &BrotliEncoderParams, output: &mut Vec<u8>) -> Result<()> {
        let mut input = data;
        brotli::BrotliCompress(&mut input, output, params)?;
        Ok(())
    }
}

impl BrotliEngine for RustBrotli {
    fn encode(&self, data: &[u8], quality: Quality, byte_align: bool) -> Result<Vec<u8>> {
        let mut params = self.params(quality);
        let mut output = Vec::with_capacity(data.len() / 2 + 16);

        if !byte_align {
            Self::compress(data, &params, &mut output)?;
            return Ok(output);
        }

        // Headerless, unterminated meta-blocks that start and end on a byte
        // boundary, wrapped in our own header and terminator
        params.byte_align = true;
        params.bare_stream = true;
        params.catable = true;
        params.appendable = true;

        output.extend_from_slice(StreamHeader::new(self.window_bits).as_bytes());
        Self::compress(data, &params, &mut output)?;
        output.push(STREAM_TERMINATOR);
        Ok(output)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        decode(data)
    }
}

/// Engine that stores payloads in uncompressed meta-blocks
///
/// Ignores the quality level; output is always byte aligned and carries
/// the configured header, so every stream it produces is extractable.
#[derive(Clone, Debug)]
pub struct StoredEngine {
    header: StreamHeader,
}

impl StoredEngine {
    pub fn new(window_bits: WindowBits) -> Self {
        Self { header: StreamHeader::new(window_bits) }
    }
}

impl Default for StoredEngine {
    fn default() -> Self {
        Self { header: StreamHeader::canonical().clone() }
    }
}

impl BrotliEngine for StoredEngine {
    fn encode(&self, data: &[u8], _quality: Quality, _byte_align: bool) -> Result<Vec<u8>> {
        Ok(encode_stored(data, &self.header))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        decode(data)
    }
}

/// Decompress a complete Brotli stream
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = brotli::Decompressor::new(data, DECODE_BUFFER_SIZE);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output).map_err(|e| Error::Decode(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_brotli_round_trip() {
        let engine = RustBrotli::default();
        let data = b"the quick brown fox jumps over the lazy dog, twice: the quick brown fox";
        for level in [0, 1, 6, 11] {
            let encoded = engine.encode(data, Quality::from_level(level), false).unwrap();
            assert_eq!(engine.decode(&encoded).unwrap(), data, "quality {}", level);
        }
    }

    #[test]
    fn test_rust_brotli_byte_aligned_is_extractable() {
        let engine = RustBrotli::default();
        let data = b"the quick brown fox jumps over the lazy dog, twice: the quick brown fox";
        for level in [1, 6, 9, 11] {
            let encoded = engine.encode(data, Quality::from_level(level), true).unwrap();
            assert_eq!(encoded[..2], [0x6b, 0x00]);
            assert_eq!(encoded.last(), Some(&STREAM_TERMINATOR));
            assert_eq!(engine.decode(&encoded).unwrap(), data, "quality {}", level);

            let block = crate::try_extract_bare_aligned_block(&encoded).unwrap();
            assert_eq!(decode(&crate::assemble(&[&block, &block])).unwrap(), data.repeat(2));
        }
    }

    #[test]
    fn test_stored_engine_round_trip() {
        let engine = StoredEngine::default();
        let encoded = engine.encode(b"stored", Quality::default(), true).unwrap();
        assert_eq!(encoded[..2], [0x6b, 0x00]);
        assert_eq!(engine.decode(&encoded).unwrap(), b"stored");
    }

    #[test]
    fn test_stored_engine_other_window() {
        let engine = StoredEngine::new(WindowBits::new(16).unwrap());
        let encoded = engine.encode(b"abc", Quality::default(), true).unwrap();
        assert_eq!(encoded[0], 0x0c);
        assert_eq!(decode(&encoded).unwrap(), b"abc");
    }

    #[test]
    fn test_decode_empty_stream() {
        assert_eq!(decode(&[0x6b, 0x00, 0x03]).unwrap(), b"");
    }
}
