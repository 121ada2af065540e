use std::fmt;

/// Boxed error produced by a compression backend.
///
/// Compressor failures are handed back to the caller exactly as the backend
/// produced them.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a dictionary or an encoder from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// Fewer than two words: not even one bit per word is available
    TooSmall { size: u128 },
    /// The derived bit width would exceed 64
    TooLarge { size: u128 },
    /// The same word appears twice
    DuplicateWord { word: String, first: usize, second: usize },
    /// A word is empty or contains whitespace
    InvalidWord { word: String, index: usize },
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        write_header(f, use_color)?;

        match self {
            DictionaryError::TooSmall { size } => {
                writeln!(f, "dictionary too small: {} words (minimum 2)", size)?;
                write_hint(f, use_color, "a word list needs at least 2 entries to carry 1 bit")
            }
            DictionaryError::TooLarge { size } => {
                writeln!(f, "dictionary too large: {} words (maximum 64 bits per word)", size)?;
                write_hint(f, use_color, "trim the word list below 2^65 entries")
            }
            DictionaryError::DuplicateWord {
                word,
                first,
                second,
            } => {
                writeln!(
                    f,
                    "duplicate word '{}' at indices {} and {}",
                    word, first, second
                )?;
                write_hint(f, use_color, "every word in a dictionary must be distinct")
            }
            DictionaryError::InvalidWord { word, index } => {
                writeln!(f, "invalid word {:?} at index {}", word, index)?;
                write_hint(
                    f,
                    use_color,
                    "words must be non-empty and contain no whitespace or delimiter",
                )
            }
        }
    }
}

impl std::error::Error for DictionaryError {}

/// Errors that can occur during decoding.
#[derive(Debug)]
pub enum DecodeError {
    /// A token is neither a dictionary word nor a run count
    UnknownWord {
        word: String,
        position: usize,
        input: String,
    },
    /// The dictionary contains a purely numeric word, so counts are ambiguous
    NumericWord { word: String },
    /// A run count expands past the decoder's limit
    RunTooLong { count: u64, position: usize },
    /// The runs together expand past the decoder's limit
    OutputTooLarge { limit: u64, position: usize },
    /// The recovered stream was rejected by the decompressor
    Decompression(BoxError),
}

impl DecodeError {
    /// Create an UnknownWord error with context
    pub fn unknown_word(word: &str, position: usize, input: &str) -> Self {
        // Truncate long inputs
        let display_input = if input.chars().count() > 60 {
            format!("{}...", input.chars().take(60).collect::<String>())
        } else {
            input.to_string()
        };

        DecodeError::UnknownWord {
            word: word.to_string(),
            position,
            input: display_input,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        write_header(f, use_color)?;

        match self {
            DecodeError::UnknownWord {
                word,
                position,
                input,
            } => {
                writeln!(f, "unknown word '{}' at token {}", word, position)?;
                writeln!(f)?;
                writeln!(f, "  {}", input)?;
                writeln!(f)?;
                write_hint(
                    f,
                    use_color,
                    "decode with the same word list that produced the input",
                )
            }
            DecodeError::NumericWord { word } => {
                writeln!(f, "dictionary contains numeric word '{}'", word)?;
                write_hint(
                    f,
                    use_color,
                    "run counts cannot be told apart from numeric words; use a word list without numerals",
                )
            }
            DecodeError::RunTooLong { count, position } => {
                writeln!(f, "run of {} words at token {} is too long", count, position)?;
                write_hint(f, use_color, "the input was not produced by this encoder")
            }
            DecodeError::OutputTooLarge { limit, position } => {
                writeln!(
                    f,
                    "input expands to more than {} words by token {}",
                    limit, position
                )?;
                write_hint(f, use_color, "the input was not produced by this encoder")
            }
            DecodeError::Decompression(source) => {
                writeln!(f, "decompression failed: {}", source)?;
                write_hint(
                    f,
                    use_color,
                    "decode with the compressor that produced the input",
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Decompression(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Error when a named word list is not in the registry
#[derive(Debug)]
pub struct WordlistNotFoundError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl WordlistNotFoundError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for WordlistNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        write_header(f, use_color)?;
        writeln!(f, "word list '{}' not found", self.name)?;
        writeln!(f)?;

        if let Some(suggestion) = &self.suggestion {
            if use_color {
                writeln!(f, "\x1b[1;36mhint:\x1b[0m did you mean '{}'?", suggestion)?;
            } else {
                writeln!(f, "hint: did you mean '{}'?", suggestion)?;
            }
        }

        if use_color {
            write!(
                f,
                "      run \x1b[1m`word-d --list`\x1b[0m to see all word lists"
            )
        } else {
            write!(f, "      run `word-d --list` to see all word lists")
        }
    }
}

impl std::error::Error for WordlistNotFoundError {}

fn write_header(f: &mut fmt::Formatter<'_>, use_color: bool) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;31merror:\x1b[0m ")
    } else {
        write!(f, "error: ")
    }
}

fn write_hint(f: &mut fmt::Formatter<'_>, use_color: bool, hint: &str) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;36mhint:\x1b[0m {}", hint)
    } else {
        write!(f, "hint: {}", hint)
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stderr is a terminal
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len2 = s2.chars().count();
    if s1.is_empty() {
        return len2;
    }
    if len2 == 0 {
        return s1.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching word list name
pub fn find_closest_wordlist(name: &str, available: &[String]) -> Option<String> {
    // 1-2 character typos for short names, up to 3 for longer names
    let threshold = if name.len() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.clone())
}
