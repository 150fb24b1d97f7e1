//! Parallel splicer implementation using a worker pool.
//!
//! Architecture:
//! - Feeder thread: Send every input stream to the workers
//! - Worker pool: Extract bare blocks in parallel
//! - Main thread: Receive blocks, restore input order, write the stream

use std::collections::BTreeMap;
use std::io::{BufWriter, Write};

use crossbeam::channel::{bounded, Receiver, Sender};
use log::info;

use super::reject;
use crate::error::{Error, Result};
use crate::stream::{try_extract_with_header, StreamAssembler, StreamHeader};
use crate::{SpliceConfig, SpliceStats, Splicer};

/// A job for extracting a single stream
struct ExtractionJob<'a> {
    /// Position of the stream in the input
    index: usize,
    data: &'a [u8],
}

/// Result of extracting a single stream
struct ExtractedBlock {
    /// Position of the stream in the input
    index: usize,
    /// Bare block, `None` when the stream was not extractable
    block: Option<Vec<u8>>,
}

/// Parallel splicer implementation
pub struct ParallelSplicer {
    config: SpliceConfig,
    header: StreamHeader,
}

impl ParallelSplicer {
    pub fn new(config: SpliceConfig) -> Self {
        let header = StreamHeader::new(config.window_bits);
        Self { config, header }
    }

    fn effective_threads(&self) -> usize {
        match self.config.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }
}

impl Splicer for ParallelSplicer {
    fn splice<W: Write>(&mut self, streams: &[&[u8]], output: W) -> Result<SpliceStats> {
        let num_threads = self.effective_threads().min(streams.len().max(1));

        // For single thread, delegate to single-threaded implementation for efficiency
        if num_threads == 1 {
            let mut single = super::single::SingleThreadedSplicer::new(self.config.clone());
            return single.splice(streams, output);
        }

        self.splice_parallel(streams, output, num_threads)
    }
}

impl ParallelSplicer {
    fn splice_parallel<W: Write>(
        &self,
        streams: &[&[u8]],
        output: W,
        num_threads: usize,
    ) -> Result<SpliceStats> {
        // Channel capacity - enough to keep workers busy without excessive memory
        let channel_capacity = num_threads * 4;

        let (job_tx, job_rx): (Sender<ExtractionJob>, Receiver<ExtractionJob>) =
            bounded(channel_capacity);
        let (result_tx, result_rx): (Sender<ExtractedBlock>, Receiver<ExtractedBlock>) =
            bounded(channel_capacity);

        let header = &self.header;

        // Use crossbeam's scoped threads so jobs can borrow the input streams
        let result = crossbeam::scope(|scope| {
            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();

                scope.spawn(move |_| {
                    worker_thread(job_rx, result_tx, header);
                });
            }

            // Drop our copies of the channels that workers use
            drop(job_rx);
            drop(result_tx);

            scope.spawn(move |_| {
                for (index, &data) in streams.iter().enumerate() {
                    if job_tx.send(ExtractionJob { index, data }).is_err() {
                        // Workers are gone, the main thread already failed
                        break;
                    }
                }
            });

            self.collect_and_write(streams, output, result_rx)
        });

        result.map_err(|_| Error::Internal("Thread panicked".to_string()))?
    }

    /// Receive extracted blocks and write them in input order
    fn collect_and_write<W: Write>(
        &self,
        streams: &[&[u8]],
        output: W,
        result_rx: Receiver<ExtractedBlock>,
    ) -> Result<SpliceStats> {
        let writer = BufWriter::with_capacity(self.config.buffer_size, output);
        let mut assembler = StreamAssembler::with_header(writer, &self.header);
        let mut stats = SpliceStats {
            input_bytes: streams.iter().map(|s| s.len() as u64).sum(),
            ..Default::default()
        };

        // Buffer for out-of-order blocks
        let mut pending: BTreeMap<usize, Option<Vec<u8>>> = BTreeMap::new();
        let mut next_index = 0;

        for extracted in result_rx.iter() {
            pending.insert(extracted.index, extracted.block);

            while let Some(block) = pending.remove(&next_index) {
                match block {
                    Some(block) => {
                        assembler.push_block(&block)?;
                        stats.blocks_spliced += 1;
                    }
                    None => reject(&self.config, next_index, &mut stats)?,
                }
                next_index += 1;
            }
        }

        if next_index != streams.len() {
            return Err(Error::Internal(format!(
                "Received {} of {} extracted blocks",
                next_index,
                streams.len()
            )));
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

/// Worker thread: extract bare blocks until the job channel closes
fn worker_thread(
    job_rx: Receiver<ExtractionJob>,
    result_tx: Sender<ExtractedBlock>,
    header: &StreamHeader,
) {
    for job in job_rx {
        let block = try_extract_with_header(job.data, header);
        if result_tx.send(ExtractedBlock { index: job.index, block }).is_err() {
            break;
        }
    }
}
