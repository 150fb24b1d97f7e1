use super::constants::STREAM_TERMINATOR;
use super::header::StreamHeader;
use crate::error::{Error, Result};
use std::io::Write;

/// Writes one stream from any number of bare blocks
///
/// The header is written before the first block (or at `finish` when no
/// block was pushed); `finish` appends the shared terminator.
pub struct StreamAssembler<W: Write> {
    writer: W,
    header: Vec<u8>,
    header_written: bool,
    finished: bool,
    blocks_written: u64,
    bytes_written: u64,
}

impl<W: Write> StreamAssembler<W> {
    /// Assembler using the canonical (window 22) header
    pub fn new(writer: W) -> Self {
        Self::with_header(writer, StreamHeader::canonical())
    }

    pub fn with_header(writer: W, header: &StreamHeader) -> Self {
        Self {
            writer,
            header: header.as_bytes().to_vec(),
            header_written: false,
            finished: false,
            blocks_written: 0,
            bytes_written: 0,
        }
    }

    /// Append a bare block after the previously pushed ones.
    ///
    /// Fails once the terminator has been written.
    pub fn push_block(&mut self, block: &[u8]) -> Result<()> {
        if self.finished {
            return Err(Error::Internal("Block pushed after stream terminator".to_string()));
        }
        self.write_header()?;
        self.writer.write_all(block)?;
        self.blocks_written += 1;
        self.bytes_written += block.len() as u64;
        Ok(())
    }

    /// Write the terminator and flush. Returns the total bytes written.
    pub fn finish(&mut self) -> Result<u64> {
        if !self.finished {
            self.write_header()?;
            self.writer.write_all(&[STREAM_TERMINATOR])?;
            self.bytes_written += 1;
            self.writer.flush()?;
            self.finished = true;
        }
        Ok(self.bytes_written)
    }

    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Get the inner writer (consumes self)
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.writer.write_all(&self.header)?;
            self.bytes_written += self.header.len() as u64;
            self.header_written = true;
        }
        Ok(())
    }
}

/// Canonical header, every block in order, terminator
pub fn assemble<B: AsRef<[u8]>>(blocks: &[B]) -> Vec<u8> {
    let header = StreamHeader::canonical().as_bytes();
    let body: usize = blocks.iter().map(|b| b.as_ref().len()).sum();

    let mut stream = Vec::with_capacity(header.len() + body + 1);
    stream.extend_from_slice(header);
    for block in blocks {
        stream.extend_from_slice(block.as_ref());
    }
    stream.push(STREAM_TERMINATOR);
    stream
}
