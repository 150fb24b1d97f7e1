pub mod assemble;
pub mod constants;
pub mod extract;
pub mod framer;
pub mod header;
pub mod stored;

pub use assemble::{assemble, StreamAssembler};
pub use constants::*;
pub use extract::{
    extract_bare_block, find_terminator, try_extract_bare_aligned_block, try_extract_with_header,
    Rejection,
};
pub use framer::pad_to_byte_boundary;
pub use header::{canonical_header_bits, decode_header_length, StreamHeader, WindowBits};
pub use stored::encode_stored;
