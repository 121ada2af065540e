//! Built-in word lists for word-based encoding.
//!
//! Three lowercase English lists, each a superset of the next smaller one:
//! - `words1024`: 10 bits per word (default)
//! - `words512`: 9 bits per word
//! - `words256`: 8 bits per word

use crate::core::word_dictionary::WordDictionary;

/// 1024 common English words.
pub const WORDS_1024: &str = include_str!("words1024.txt");

/// 512 common English words.
pub const WORDS_512: &str = include_str!("words512.txt");

/// 256 common English words.
pub const WORDS_256: &str = include_str!("words256.txt");

/// Names of the built-in lists, largest first.
pub const BUILTIN_NAMES: [&str; 3] = ["words1024", "words512", "words256"];

/// Returns the raw text of a built-in list by name.
pub fn builtin_text(name: &str) -> Option<&'static str> {
    match name {
        "words1024" => Some(WORDS_1024),
        "words512" => Some(WORDS_512),
        "words256" => Some(WORDS_256),
        _ => None,
    }
}

/// Builds a dictionary from a built-in list by name.
pub fn builtin(name: &str) -> Option<WordDictionary> {
    builtin_text(name).map(|text| {
        WordDictionary::from_text(text).expect("built-in word lists are valid")
    })
}

/// The default 1024-word dictionary.
///
/// # Example
///
/// ```
/// use word_d::wordlists::words1024;
///
/// let dict = words1024();
/// assert_eq!(dict.len(), 1024);
/// ```
pub fn words1024() -> WordDictionary {
    WordDictionary::from_text(WORDS_1024).expect("words1024 list should be valid")
}
