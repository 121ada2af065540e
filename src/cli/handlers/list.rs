use word_d::{WordEncoder, WordlistRegistry};

pub fn handle(config: &WordlistRegistry) -> Result<(), Box<dyn std::error::Error>> {
    println!("Available word lists:\n");

    for name in config.names() {
        let Some(wordlist) = config.get_wordlist(&name) else {
            continue;
        };
        let description = wordlist.description.as_deref().unwrap_or("");

        // A broken override should not hide the rest of the listing
        match wordlist.build().map(WordEncoder::new) {
            Ok(Ok(encoder)) => println!(
                "  {:<15} {:>6} words {:>3} bits {:>7.2}%  {}",
                name,
                encoder.dictionary().len(),
                encoder.bits_per_word(),
                encoder.efficiency() * 100.0,
                description
            ),
            Ok(Err(e)) => println!("  {:<15} unusable: {}", name, e),
            Err(e) => println!("  {:<15} unusable: {}", name, e),
        }
    }

    Ok(())
}
