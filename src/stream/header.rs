//! Brotli stream header (RFC 7932, section 9.1).
//!
//! A stream opens with WBITS, a 1, 4 or 7 bit variable-length code for the
//! LZ window size. Spliceable streams additionally close an empty metadata
//! meta-block right after it so that the first real meta-block starts on a
//! byte boundary.

use std::io::Read;
use std::sync::OnceLock;

use super::constants::*;
use super::framer::pad_to_byte_boundary;
use crate::bits::{BitReader, BitSequence};
use crate::error::{Error, Result};

/// LZ window size exponent, 10..=24
///
/// WBITS codes as they appear in the stream, parsed right to left:
///
/// ```text
///   Value  Pattern    Value  Pattern    Value  Pattern
///     10   0100001      15   1110001      20      0111
///     11   0110001      16         0      21      1001
///     12   1000001      17   0000001      22      1011
///     13   1010001      18      0011      23      1101
///     14   1100001      19      0101      24      1111
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowBits(u8);

impl WindowBits {
    pub const CANONICAL: WindowBits = WindowBits(CANONICAL_WINDOW_BITS);

    pub fn new(value: u8) -> Result<Self> {
        if (MIN_WINDOW_BITS..=MAX_WINDOW_BITS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidWindowBits(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// WBITS code as `(value, bit length)`, LSB first
    pub fn code(self) -> (u32, u8) {
        let v = self.0 as u32;
        match self.0 {
            16 => (0, 1),
            17 => (1, 7),
            18..=24 => (((v - 17) << 1) | 1, 4),
            _ => (((v - 8) << 4) | 1, 7),
        }
    }

    /// WBITS code as a bit sequence
    pub fn bits(self) -> BitSequence {
        let (code, len) = self.code();
        (0..len).map(|i| (code >> i) & 1 != 0).collect()
    }

    /// Read a WBITS code from the current reader position
    pub fn read<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        if !reader.read_bit()? {
            return Ok(Self(16));
        }

        let n = reader.read_bits(3)? as u8;
        if n != 0 {
            return Ok(Self(17 + n));
        }

        match reader.read_bits(3)? as u8 {
            0 => Ok(Self(17)),
            1 => Err(Error::InvalidWindowHeader(RESERVED_WINDOW_CODE)),
            n => Ok(Self(8 + n)),
        }
    }

    /// Decode the window size at the start of a stream
    pub fn decode(stream: &[u8]) -> Result<Self> {
        let mut reader = BitReader::new(stream);
        Self::read(&mut reader).map_err(|e| match e {
            Error::InvalidWindowHeader(_) => Error::InvalidWindowHeader(stream[0]),
            e => e,
        })
    }
}

impl Default for WindowBits {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl TryFrom<u8> for WindowBits {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

/// Number of bits (1, 4 or 7) taken by the WBITS code starting in `first_byte`
///
/// Recognizes `0` (1 bit), `11` (4 bits) and `0001` (7 bits) as leading
/// patterns. Every other first byte, the reserved 7-bit code included, is an
/// unrecognized header. Use [`WindowBits::decode`] for the full RFC table.
pub fn decode_header_length(first_byte: u8) -> Result<u8> {
    if first_byte & 0x01 == 0 {
        Ok(1)
    } else if first_byte & 0x03 == 0x03 {
        Ok(4)
    } else if first_byte & 0x0f == 0x01 && first_byte & 0x7f != RESERVED_WINDOW_CODE {
        Ok(7)
    } else {
        Err(Error::InvalidWindowHeader(first_byte))
    }
}

/// WBITS code of the canonical window size: `1, 1, 0, 1`
pub fn canonical_header_bits() -> BitSequence {
    WindowBits::CANONICAL.bits()
}

/// WBITS code followed by empty-meta-block padding to a byte boundary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    window_bits: WindowBits,
    bits: BitSequence,
    bytes: Vec<u8>,
}

impl StreamHeader {
    pub fn new(window_bits: WindowBits) -> Self {
        let mut bits = window_bits.bits();
        pad_to_byte_boundary(&mut bits);
        let bytes = bits.to_bytes();
        Self { window_bits, bits, bytes }
    }

    /// Shared window-22 header, built on first use
    pub fn canonical() -> &'static StreamHeader {
        static CANONICAL: OnceLock<StreamHeader> = OnceLock::new();
        CANONICAL.get_or_init(|| StreamHeader::new(WindowBits::CANONICAL))
    }

    pub fn window_bits(&self) -> WindowBits {
        self.window_bits
    }

    pub fn bits(&self) -> &BitSequence {
        &self.bits
    }

    /// Header length in bits (always a multiple of 8)
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
