use crate::cli::{Cli, config::read_input};
use std::fs;
use word_d::WordEncoder;

pub fn handle(cli: &Cli, encoder: &WordEncoder) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(cli)?;
    let encoded = encoder
        .encode_to_string(&data)
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    if let Some(output_path) = &cli.output {
        fs::write(output_path, format!("{}\n", encoded))?;
    } else {
        println!("{}", encoded);
    }

    Ok(())
}
