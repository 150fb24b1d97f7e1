/// Smallest window size expressible in the WBITS field
pub const MIN_WINDOW_BITS: u8 = 10;

/// Largest window size expressible in the WBITS field
pub const MAX_WINDOW_BITS: u8 = 24;

/// Window size of the only header recognized by default
pub const CANONICAL_WINDOW_BITS: u8 = 22;

/// Canonical stream header: WBITS=22 followed by an empty metadata block
pub const CANONICAL_HEADER: [u8; 2] = [0x6b, 0x00];

/// Low 7 bits of the illegal WBITS code (would decode to 16, which has a 1-bit code)
pub const RESERVED_WINDOW_CODE: u8 = 0x11;

/// ISLAST=1, ISLASTEMPTY=1 as an isolated byte
pub const STREAM_TERMINATOR: u8 = 0x03;

/// Control bits of an empty, non-final meta-block, in stream order:
/// ISLAST, MNIBBLES (2 bits, 11 = metadata), reserved, MSKIPBYTES (2 bits)
pub const EMPTY_META_BLOCK_BITS: [bool; 6] = [false, true, true, false, false, false];

/// Largest payload of an uncompressed meta-block with MNIBBLES=4
pub const MAX_STORED_BLOCK_LEN: usize = 1 << 16;
