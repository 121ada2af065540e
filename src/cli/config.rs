use super::Cli;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use word_d::{
    Compression, CompressionAlgorithm, WordDictionary, WordEncoder, WordlistNotFoundError,
    WordlistRegistry, find_closest_wordlist,
};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "WORD_D_LOG";

/// Installs the stderr tracing subscriber.
///
/// `WORD_D_LOG` wins when set; otherwise warnings are shown, or only errors
/// with `--quiet`.
pub fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Determine compressor and level from CLI args or config
pub fn resolve_compression(
    cli: &Cli,
    config: &WordlistRegistry,
) -> Result<Compression, Box<dyn std::error::Error>> {
    let algorithm = match &cli.compressor {
        Some(name) => CompressionAlgorithm::from_str(name)?,
        None => config.default_compressor()?,
    };
    let level = cli
        .level
        .unwrap_or_else(|| config.compression_level(algorithm));

    tracing::debug!(%algorithm, level, "compressor selected");
    Ok(algorithm.with_level(level))
}

/// Build the dictionary named on the command line, or the configured default
pub fn create_dictionary(
    cli: &Cli,
    config: &WordlistRegistry,
) -> Result<WordDictionary, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.dict {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read dictionary {:?}: {}", path, e))?;
        return Ok(WordDictionary::from_text(&text)?);
    }

    let name = cli
        .wordlist
        .as_deref()
        .unwrap_or_else(|| config.default_wordlist());
    let wordlist = config.get_wordlist(name).ok_or_else(|| {
        let suggestion = find_closest_wordlist(name, &config.names());
        WordlistNotFoundError::new(name, suggestion)
    })?;

    wordlist
        .build()
        .map_err(|e| format!("invalid word list '{}': {}", name, e).into())
}

/// Build the encoder, rejecting dictionaries it cannot use
pub fn create_encoder(
    cli: &Cli,
    config: &WordlistRegistry,
) -> Result<WordEncoder, Box<dyn std::error::Error>> {
    let encoder = WordEncoder::new(create_dictionary(cli, config)?)?;
    tracing::debug!(
        words = encoder.dictionary().len(),
        bits_per_word = encoder.bits_per_word(),
        "encoder ready"
    );
    Ok(encoder)
}

/// Read FILE or stdin, enforcing --max-size
pub fn read_input(cli: &Cli) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(file_path) = &cli.file {
        if cli.max_size > 0 {
            let file_size = fs::metadata(file_path)?.len() as usize;

            if file_size > cli.max_size {
                if !cli.force {
                    return Err(format!(
                        "File size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
                        file_size, cli.max_size
                    )
                    .into());
                }
                tracing::warn!(
                    file_size,
                    limit = cli.max_size,
                    "processing file above size limit"
                );
            }
        }

        return Ok(fs::read(file_path)?);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    if cli.max_size > 0 && buffer.len() > cli.max_size && !cli.force {
        return Err(format!(
            "Input size ({} bytes) exceeds maximum ({} bytes). Use --force to process anyway.",
            buffer.len(),
            cli.max_size
        )
        .into());
    }

    Ok(buffer)
}
