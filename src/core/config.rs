use crate::core::word_dictionary::WordDictionary;
use crate::features::compression::CompressionAlgorithm;
use crate::wordlists;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a word list's words come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordlistSource {
    /// One of the lists compiled into the crate
    Builtin(String),
    /// A whitespace-separated word file
    File(PathBuf),
    /// Words listed directly in the configuration
    Inline(Vec<String>),
}

/// Configuration for a single word list loaded from TOML.
#[derive(Debug, Deserialize, Clone)]
pub struct WordlistConfig {
    /// Name of a built-in list
    #[serde(default)]
    pub builtin: Option<String>,
    /// Path to a word file; `~` is expanded
    #[serde(default)]
    pub path: Option<String>,
    /// Inline word list
    #[serde(default)]
    pub words: Option<Vec<String>>,
    /// Separator placed between output tokens (default: single space)
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Whether decoding matches words case-sensitively (default: true)
    #[serde(default)]
    pub case_sensitive: Option<bool>,
    /// Free-form description shown by `--list`
    #[serde(default)]
    pub description: Option<String>,
}

impl WordlistConfig {
    /// Resolves which source this entry names.
    ///
    /// Exactly one of `builtin`, `path` and `words` must be set.
    pub fn source(&self) -> Result<WordlistSource, String> {
        match (&self.builtin, &self.path, &self.words) {
            (Some(name), None, None) => Ok(WordlistSource::Builtin(name.clone())),
            (None, Some(path), None) => Ok(WordlistSource::File(PathBuf::from(
                shellexpand::tilde(path).as_ref(),
            ))),
            (None, None, Some(words)) => Ok(WordlistSource::Inline(words.clone())),
            (None, None, None) => Err("word list needs one of `builtin`, `path` or `words`".into()),
            _ => Err("word list sets more than one of `builtin`, `path` and `words`".into()),
        }
    }

    /// Loads the words and builds the dictionary.
    pub fn build(&self) -> Result<WordDictionary, Box<dyn std::error::Error>> {
        let mut builder = match self.source()? {
            WordlistSource::Builtin(name) => {
                let text = wordlists::builtin_text(&name)
                    .ok_or_else(|| format!("unknown built-in word list '{}'", name))?;
                WordDictionary::builder().words_from_str(text)
            }
            WordlistSource::File(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read word list {:?}: {}", path, e))?;
                WordDictionary::builder().words_from_str(&text)
            }
            WordlistSource::Inline(words) => WordDictionary::builder().words(words),
        };

        if let Some(delimiter) = &self.delimiter {
            builder = builder.delimiter(delimiter.clone());
        }
        if let Some(case_sensitive) = self.case_sensitive {
            builder = builder.case_sensitive(case_sensitive);
        }
        Ok(builder.build()?)
    }
}

/// Configuration for a compression algorithm.
#[derive(Debug, Deserialize, Clone)]
pub struct CompressionConfig {
    /// Default compression level
    pub default_level: u32,
}

/// Global settings for word-d.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Word list used when none is named
    #[serde(default)]
    pub default_wordlist: Option<String>,
    /// Compressor used when none is named
    #[serde(default)]
    pub default_compressor: Option<String>,
}

/// Collection of word list configurations loaded from TOML files.
#[derive(Debug, Deserialize)]
pub struct WordlistRegistry {
    /// Map of word list names to their configurations
    #[serde(default)]
    pub wordlists: HashMap<String, WordlistConfig>,
    /// Compression algorithm configurations
    #[serde(default)]
    pub compression: HashMap<String, CompressionConfig>,
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl WordlistRegistry {
    /// Parses word list configurations from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in configuration bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../wordlists.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in configuration (from library)
    /// 2. `~/.config/word-d/wordlists.toml` (user overrides)
    /// 3. `./wordlists.toml` (project-local overrides)
    ///
    /// Later configurations override earlier ones for matching names.
    /// Override files that fail to parse are skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        let user_config_path =
            dirs::config_dir().map(|dir| dir.join("word-d").join("wordlists.toml"));
        let local_config_path = Some(PathBuf::from("wordlists.toml"));

        for path in [user_config_path, local_config_path].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(overrides) => {
                    tracing::debug!(path = %path.display(), "loaded config overrides");
                    config.merge(overrides);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping config file");
                }
            }
        }

        Ok(config)
    }

    /// Merges another configuration into this one.
    ///
    /// Entries from `other` replace entries with the same name in `self`;
    /// settings present in `other` replace those in `self`.
    pub fn merge(&mut self, other: WordlistRegistry) {
        self.wordlists.extend(other.wordlists);
        self.compression.extend(other.compression);

        if other.settings.default_wordlist.is_some() {
            self.settings.default_wordlist = other.settings.default_wordlist;
        }
        if other.settings.default_compressor.is_some() {
            self.settings.default_compressor = other.settings.default_compressor;
        }
    }

    /// Retrieves a word list configuration by name.
    pub fn get_wordlist(&self, name: &str) -> Option<&WordlistConfig> {
        self.wordlists.get(name)
    }

    /// Word list names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.wordlists.keys().cloned().collect();
        names.sort();
        names
    }

    /// Level for `algorithm`: configured default, else the algorithm's best.
    pub fn compression_level(&self, algorithm: CompressionAlgorithm) -> u32 {
        self.compression
            .get(algorithm.as_str())
            .map(|c| c.default_level)
            .unwrap_or_else(|| algorithm.best_level())
    }

    /// The configured default word list name, falling back to `words1024`.
    pub fn default_wordlist(&self) -> &str {
        self.settings
            .default_wordlist
            .as_deref()
            .unwrap_or("words1024")
    }

    /// The configured default compressor, falling back to zlib.
    pub fn default_compressor(&self) -> Result<CompressionAlgorithm, String> {
        match &self.settings.default_compressor {
            Some(name) => CompressionAlgorithm::from_str(name),
            None => Ok(CompressionAlgorithm::Zlib),
        }
    }
}
