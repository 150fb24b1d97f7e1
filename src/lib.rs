pub mod bits;
pub mod engine;
pub mod error;
pub mod splice;
pub mod stream;

pub use bits::BitSequence;
pub use engine::{BrotliEngine, RustBrotli, StoredEngine};
pub use error::{Error, Result};
pub use splice::{ParallelSplicer, SingleThreadedSplicer};
pub use stream::{
    assemble, decode_header_length, encode_stored, pad_to_byte_boundary,
    try_extract_bare_aligned_block, try_extract_with_header, StreamAssembler, StreamHeader,
    WindowBits,
};

/// Brotli quality level (0-11)
///
/// - Levels 0-1: fast single-pass compressors
/// - Levels 2-9: hashing-based matchers of increasing effort
/// - Levels 10-11: Zopfli-style optimal parsing (slowest, smallest)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: Quality = Quality(11);

    /// Create from numeric level, clamped to 0-11
    pub fn from_level(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    /// Get numeric level (0-11)
    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(6)
    }
}

/// Configuration for splicing
#[derive(Clone, Debug)]
pub struct SpliceConfig {
    /// Window size of the shared header every input must carry (default: 22)
    pub window_bits: WindowBits,
    /// Number of threads for parallel extraction (0 = auto, 1 = single-threaded)
    pub num_threads: usize,
    /// Buffer size for output writes
    pub buffer_size: usize,
    /// Drop inputs that are not extractable instead of failing
    pub skip_unextractable: bool,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            window_bits: WindowBits::CANONICAL,
            num_threads: 0,
            buffer_size: 128 * 1024,
            skip_unextractable: false,
        }
    }
}

/// Statistics from a splicing operation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpliceStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub blocks_spliced: u64,
    /// Inputs skipped because they were not extractable
    pub streams_rejected: u64,
}

/// Trait for the complete splicing operation
pub trait Splicer {
    /// Splice complete single-block streams, in order, into one stream
    fn splice<W: std::io::Write>(&mut self, streams: &[&[u8]], output: W) -> Result<SpliceStats>;
}
