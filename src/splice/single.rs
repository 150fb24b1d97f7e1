use std::io::{BufWriter, Write};

use log::info;

use super::reject;
use crate::error::Result;
use crate::stream::{try_extract_with_header, StreamAssembler, StreamHeader};
use crate::{SpliceConfig, SpliceStats, Splicer};

/// Single-threaded splicer implementation
pub struct SingleThreadedSplicer {
    config: SpliceConfig,
    header: StreamHeader,
}

impl SingleThreadedSplicer {
    pub fn new(config: SpliceConfig) -> Self {
        let header = StreamHeader::new(config.window_bits);
        Self { config, header }
    }
}

impl Splicer for SingleThreadedSplicer {
    fn splice<W: Write>(&mut self, streams: &[&[u8]], output: W) -> Result<SpliceStats> {
        let writer = BufWriter::with_capacity(self.config.buffer_size, output);
        let mut assembler = StreamAssembler::with_header(writer, &self.header);
        let mut stats = SpliceStats::default();

        for (index, stream) in streams.iter().enumerate() {
            stats.input_bytes += stream.len() as u64;
            match try_extract_with_header(stream, &self.header) {
                Some(block) => {
                    assembler.push_block(&block)?;
                    stats.blocks_spliced += 1;
                }
                None => reject(&self.config, index, &mut stats)?,
            }
        }

        stats.output_bytes = assembler.finish()?;
        info!(
            "Spliced {} of {} streams into {} bytes",
            stats.blocks_spliced,
            streams.len(),
            stats.output_bytes
        );
        Ok(stats)
    }
}
