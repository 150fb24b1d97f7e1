use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Stream header errors
    #[error("Unrecognized window header byte: 0x{0:02x}")]
    InvalidWindowHeader(u8),

    #[error("Invalid window size: {0} (expected 10-24)")]
    InvalidWindowBits(u8),

    // Splicing errors
    #[error("Input stream {index} is not an extractable single-block stream")]
    NotExtractable { index: usize },

    // Engine errors
    #[error("Brotli decode failed: {0}")]
    Decode(String),

    // Internal errors
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
