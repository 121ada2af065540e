use crate::cli::{Cli, config::read_input};
use std::fs;
use std::io::{self, Write};
use word_d::{Compression, WordEncoder};

pub fn handle(
    cli: &Cli,
    encoder: &WordEncoder,
    compression: Compression,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(cli)?;
    let text =
        String::from_utf8(input).map_err(|_| "Input data is not valid UTF-8 text for decoding")?;

    let decoded = encoder.decode(&text, &compression)?;

    if let Some(output_path) = &cli.output {
        fs::write(output_path, &decoded)?;
    } else {
        io::stdout().write_all(&decoded)?;
    }

    Ok(())
}
