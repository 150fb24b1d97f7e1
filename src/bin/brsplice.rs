use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::info;

use brsplice::engine::decode;
use brsplice::stream::{decode_header_length, try_extract_with_header};
use brsplice::{
    encode_stored, BrotliEngine, ParallelSplicer, Quality, RustBrotli, SingleThreadedSplicer,
    SpliceConfig, Splicer, StreamAssembler, StreamHeader, WindowBits,
};

#[derive(Parser, Debug)]
#[command(name = "brsplice")]
#[command(about = "Splice byte-aligned Brotli streams without recompressing them")]
#[command(version)]
struct Args {
    /// Show verbose statistics and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Window size (10-24) of the shared stream header
    #[arg(short = 'w', long, global = true, default_value = "22")]
    window: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Strip header and terminator from a single-block stream
    Extract {
        /// Input stream (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output bare block (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Splice complete single-block streams into one stream
    Concat {
        /// Output stream (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input streams, in output order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Number of threads (0 = auto, 1 = single-threaded)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,

        /// Skip inputs that are not extractable instead of failing
        #[arg(long)]
        skip: bool,
    },

    /// Assemble previously extracted bare blocks into one stream
    Join {
        /// Output stream (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Bare blocks, in output order
        blocks: Vec<PathBuf>,
    },

    /// Compress into a byte-aligned stream
    Compress {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output stream (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Brotli quality (0-11)
        #[arg(short, long, default_value = "6")]
        quality: u8,

        /// Store the payload in uncompressed meta-blocks
        #[arg(long)]
        stored: bool,
    },

    /// Decompress a stream
    Decompress {
        /// Input stream (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check if input is extractable and exit (0=yes, 1=no, 2=error)
    Check {
        /// Input stream (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Exit codes for extract and check
const EXIT_OK: u8 = 0;
const EXIT_NOT_EXTRACTABLE: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<u8, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let header = StreamHeader::new(WindowBits::new(args.window)?);

    match &args.command {
        Command::Extract { input, output } => run_extract(input, output, &header),
        Command::Concat { output, inputs, threads, skip } => {
            let config = SpliceConfig {
                window_bits: header.window_bits(),
                num_threads: *threads,
                skip_unextractable: *skip,
                ..Default::default()
            };
            run_concat(inputs, output, config, args.verbose)
        }
        Command::Join { output, blocks } => run_join(blocks, output, &header),
        Command::Compress { input, output, quality, stored } => {
            let data = read_input(input)?;
            let encoded = if *stored {
                encode_stored(&data, &header)
            } else {
                let engine = RustBrotli::new(header.window_bits());
                engine.encode(&data, Quality::from_level(*quality), true)?
            };
            info!("Compressed {} bytes into {} bytes", data.len(), encoded.len());
            write_output(output, &encoded)?;
            Ok(EXIT_OK)
        }
        Command::Decompress { input, output } => {
            let decoded = decode(&read_input(input)?)?;
            write_output(output, &decoded)?;
            Ok(EXIT_OK)
        }
        Command::Check { input } => run_check(input, &header),
    }
}

fn run_extract(
    input: &Path,
    output: &Path,
    header: &StreamHeader,
) -> Result<u8, Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    match try_extract_with_header(&data, header) {
        Some(block) => {
            info!("Extracted {} byte bare block from {} byte stream", block.len(), data.len());
            write_output(output, &block)?;
            Ok(EXIT_OK)
        }
        None => {
            eprintln!("{}: not an extractable stream", input.display());
            Ok(EXIT_NOT_EXTRACTABLE)
        }
    }
}

fn run_concat(
    inputs: &[PathBuf],
    output: &Path,
    config: SpliceConfig,
    verbose: bool,
) -> Result<u8, Box<dyn std::error::Error>> {
    let streams = inputs.iter().map(|p| read_input(p)).collect::<io::Result<Vec<_>>>()?;
    let refs: Vec<&[u8]> = streams.iter().map(|s| s.as_slice()).collect();

    let start = std::time::Instant::now();
    let writer = open_output(output)?;
    let stats = if config.num_threads == 1 {
        SingleThreadedSplicer::new(config).splice(&refs, writer)?
    } else {
        ParallelSplicer::new(config).splice(&refs, writer)?
    };
    let elapsed = start.elapsed();

    if verbose {
        eprintln!("Splicing complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Output bytes:     {}", stats.output_bytes);
        eprintln!("  Blocks spliced:   {}", stats.blocks_spliced);
        eprintln!("  Streams skipped:  {}", stats.streams_rejected);
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(EXIT_OK)
}

fn run_join(
    blocks: &[PathBuf],
    output: &Path,
    header: &StreamHeader,
) -> Result<u8, Box<dyn std::error::Error>> {
    let mut assembler = StreamAssembler::with_header(open_output(output)?, header);
    for path in blocks {
        assembler.push_block(&read_input(path)?)?;
    }
    let written = assembler.finish()?;
    info!("Joined {} bare blocks into {} bytes", assembler.blocks_written(), written);
    Ok(EXIT_OK)
}

fn run_check(input: &Path, header: &StreamHeader) -> Result<u8, Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let Some(&first) = data.first() else {
        eprintln!("Extractable: no (empty input)");
        return Ok(EXIT_NOT_EXTRACTABLE);
    };

    let window = WindowBits::decode(&data)?;
    match decode_header_length(first) {
        Ok(len) => eprintln!("Window bits: {} ({}-bit code)", window.value(), len),
        Err(_) => eprintln!("Window bits: {} (non-canonical code)", window.value()),
    }

    let extractable = try_extract_with_header(&data, header).is_some();
    eprintln!("Extractable: {}", if extractable { "yes" } else { "no" });

    if extractable {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_NOT_EXTRACTABLE)
    }
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.to_str() == Some("-") {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        std::fs::read(path)
    }
}

fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if path.to_str() == Some("-") {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut writer = open_output(path)?;
    writer.write_all(data)?;
    writer.flush()
}
