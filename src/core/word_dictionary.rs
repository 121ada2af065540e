use crate::encoders::algorithms::errors::DictionaryError;
use std::collections::HashMap;

/// An ordered word list used as an encoding alphabet.
///
/// Word `i` stands for the index `i`. Order is significant: encoder and
/// decoder must agree on it exactly.
///
/// # Example
///
/// ```
/// use word_d::WordDictionary;
///
/// let dict = WordDictionary::builder()
///     .words(vec!["abandon", "ability", "able", "about"])
///     .build()
///     .unwrap();
///
/// assert_eq!(dict.len(), 4);
/// assert_eq!(dict.word(0), Some("abandon"));
/// assert_eq!(dict.index_of("ability"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct WordDictionary {
    words: Vec<String>,
    word_to_index: HashMap<String, usize>,
    delimiter: String,
    case_sensitive: bool,
}

impl WordDictionary {
    /// Creates a new WordDictionaryBuilder for constructing a WordDictionary.
    pub fn builder() -> WordDictionaryBuilder {
        WordDictionaryBuilder::new()
    }

    /// Parses a whitespace-separated word list, keeping its order.
    pub fn from_text(text: &str) -> Result<Self, DictionaryError> {
        Self::builder().words_from_str(text).build()
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the delimiter used between words in encoded output.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Returns whether this dictionary uses case-sensitive matching.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns the word at `index`, or `None` if out of range.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|s| s.as_str())
    }

    /// Unchecked-by-contract lookup for indices the caller has bounded.
    pub(crate) fn word_at(&self, index: usize) -> &str {
        &self.words[index]
    }

    /// Decodes a word back to its index.
    ///
    /// Matching respects the `case_sensitive` setting.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        if self.case_sensitive {
            self.word_to_index.get(word).copied()
        } else {
            self.word_to_index.get(&word.to_lowercase()).copied()
        }
    }

    /// Returns an iterator over all words in the dictionary.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|s| s.as_str())
    }

    /// First word made only of ASCII digits, if any.
    pub fn numeric_word(&self) -> Option<&str> {
        self.words()
            .find(|word| word.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// Builder for constructing a WordDictionary.
///
/// # Example
///
/// ```
/// use word_d::WordDictionary;
///
/// let dict = WordDictionary::builder()
///     .words(vec!["alpha", "bravo", "charlie", "delta"])
///     .delimiter("-")
///     .case_sensitive(false)
///     .build()
///     .unwrap();
/// assert_eq!(dict.index_of("BRAVO"), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct WordDictionaryBuilder {
    words: Option<Vec<String>>,
    delimiter: Option<String>,
    case_sensitive: Option<bool>,
}

impl WordDictionaryBuilder {
    /// Creates a new WordDictionaryBuilder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word list.
    pub fn words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = Some(words.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Sets the word list from whitespace-separated text.
    ///
    /// Any run of spaces, tabs or newlines separates words.
    pub fn words_from_str(mut self, s: &str) -> Self {
        self.words = Some(s.split_whitespace().map(str::to_string).collect());
        self
    }

    /// Sets the delimiter used between words in encoded output.
    ///
    /// Default is a single space " ".
    pub fn delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Sets whether reverse lookup is case-sensitive.
    ///
    /// Default is true.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    /// Builds the WordDictionary with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No words were provided, or the list is empty
    /// - A word is empty, contains whitespace, or contains the delimiter
    /// - Duplicate words exist (considering case sensitivity)
    pub fn build(self) -> Result<WordDictionary, DictionaryError> {
        let words = self.words.unwrap_or_default();
        if words.is_empty() {
            return Err(DictionaryError::TooSmall { size: 0 });
        }

        let case_sensitive = self.case_sensitive.unwrap_or(true);
        let delimiter = self.delimiter.unwrap_or_else(|| " ".to_string());

        let separator = delimiter.trim();

        let mut word_to_index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if word.is_empty()
                || word.chars().any(char::is_whitespace)
                || (!separator.is_empty() && word.contains(separator))
            {
                return Err(DictionaryError::InvalidWord {
                    word: word.clone(),
                    index: i,
                });
            }

            let key = if case_sensitive {
                word.clone()
            } else {
                word.to_lowercase()
            };

            if let Some(first) = word_to_index.insert(key, i) {
                return Err(DictionaryError::DuplicateWord {
                    word: word.clone(),
                    first,
                    second: i,
                });
            }
        }

        Ok(WordDictionary {
            words,
            word_to_index,
            delimiter,
            case_sensitive,
        })
    }
}
