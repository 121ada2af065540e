mod config;
mod handlers;

use clap::Parser;
use std::path::PathBuf;
use word_d::WordlistRegistry;

#[derive(Parser, Debug)]
#[command(name = "word-d")]
#[command(version)]
#[command(about = "Compress binary data and spell it out as dictionary words", long_about = None)]
pub struct Cli {
    /// File to process (if not provided, reads from stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Named word list from the registry (see --list)
    #[arg(short = 'w', long, value_name = "NAME", conflicts_with = "dict")]
    pub wordlist: Option<String>,

    /// Whitespace-separated dictionary file, used instead of --wordlist
    #[arg(long, value_name = "PATH")]
    pub dict: Option<PathBuf>,

    /// Compressor to run before encoding (none, zlib, gzip, lzma, zstd, brotli, lz4, snappy)
    #[arg(short = 'c', long, value_name = "ALGORITHM")]
    pub compressor: Option<String>,

    /// Compression level (defaults to the configured or best level)
    #[arg(long)]
    pub level: Option<u32>,

    /// Report how much of the dictionary is reachable
    #[arg(long)]
    pub efficiency: bool,

    /// Decode words back to the original data
    #[arg(short = 'd', long)]
    pub decode: bool,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// List available word lists
    #[arg(short, long)]
    pub list: bool,

    /// Suppress informational notices
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(long, default_value = "104857600")]
    pub max_size: usize,

    /// Process inputs exceeding --max-size
    #[arg(long)]
    pub force: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    config::init_logging(cli.quiet);

    let registry = WordlistRegistry::load_with_overrides()?;

    if cli.list {
        return handlers::list::handle(&registry);
    }

    let compression = config::resolve_compression(&cli, &registry)?;
    let encoder = config::create_encoder(&cli, &registry)?.with_compressor(compression);

    if cli.efficiency && !cli.quiet {
        eprintln!(
            "dictionary efficiency: {:.2}%",
            encoder.efficiency() * 100.0
        );
    }

    if cli.decode {
        handlers::decode::handle(&cli, &encoder, compression)
    } else {
        handlers::encode::handle(&cli, &encoder)
    }
}
