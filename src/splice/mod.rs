pub mod parallel;
pub mod single;

pub use parallel::ParallelSplicer;
pub use single::SingleThreadedSplicer;

use log::warn;

use crate::error::{Error, Result};
use crate::{SpliceConfig, SpliceStats};

/// Skip or fail on an input that could not be extracted
fn reject(config: &SpliceConfig, index: usize, stats: &mut SpliceStats) -> Result<()> {
    if config.skip_unextractable {
        warn!("Skipping input stream {}: not extractable", index);
        stats.streams_rejected += 1;
        Ok(())
    } else {
        Err(Error::NotExtractable { index })
    }
}
