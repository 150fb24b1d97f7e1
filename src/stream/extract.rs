//! Bare-block extraction.
//!
//! A byte-aligned single-block stream has the layout
//! `header ++ content ++ ISLAST=1 ISLASTEMPTY=1 ++ zero padding`.
//! Extraction keeps only `content`, closed with an empty continuation
//! meta-block so it can be concatenated with other bare blocks.

use log::debug;
use thiserror::Error;

use super::framer::pad_to_byte_boundary;
use super::header::StreamHeader;
use crate::bits::BitSequence;

/// Why a buffer is not an extractable stream
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("stream does not start with the expected header")]
    HeaderMismatch,

    #[error("stream does not end with an ISLAST/ISLASTEMPTY terminator")]
    MissingTerminator,
}

/// Extract the bare block of a stream that starts with the canonical
/// (window 22) header. Returns `None` for anything else.
pub fn try_extract_bare_aligned_block(buffer: &[u8]) -> Option<Vec<u8>> {
    try_extract_with_header(buffer, StreamHeader::canonical())
}

/// Same as [`try_extract_bare_aligned_block`] against an arbitrary header
pub fn try_extract_with_header(buffer: &[u8], header: &StreamHeader) -> Option<Vec<u8>> {
    match extract_bare_block(buffer, header) {
        Ok(block) => Some(block),
        Err(rejection) => {
            debug!("Stream of {} bytes not extractable: {}", buffer.len(), rejection);
            None
        }
    }
}

/// Extract the bare block, reporting why extraction failed
pub fn extract_bare_block(
    buffer: &[u8],
    header: &StreamHeader,
) -> std::result::Result<Vec<u8>, Rejection> {
    let mut bits = BitSequence::from_bytes(buffer);
    if !bits.starts_with(header.bits()) {
        return Err(Rejection::HeaderMismatch);
    }

    let header_len = header.bit_len();
    bits.shift_left(header_len);
    bits.set_len(bits.len() - header_len);

    let terminator = find_terminator(&bits).ok_or(Rejection::MissingTerminator)?;
    bits.set_len(terminator);

    pad_to_byte_boundary(&mut bits);
    Ok(bits.into_bytes())
}

/// Index of the ISLAST bit of the trailing terminator.
///
/// Trailing zero padding is skipped; the last set bit is ISLASTEMPTY and the
/// bit before it must be a set ISLAST.
pub fn find_terminator(bits: &BitSequence) -> Option<usize> {
    let is_last_empty = bits.last_set_bit()?;
    let is_last = is_last_empty.checked_sub(1)?;
    bits.get(is_last).then_some(is_last)
}
