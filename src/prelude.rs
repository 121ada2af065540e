//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use word_d::prelude::*;
//!
//! let registry = WordlistRegistry::load_default().unwrap();
//! let dict = registry.get_wordlist("words256").unwrap().build().unwrap();
//! let encoder = WordEncoder::new(dict).unwrap();
//! assert_eq!(encoder.bits_per_word(), 8);
//! ```

pub use crate::{
    // Compression
    Compression,
    CompressionAlgorithm,
    Compressor,
    // Errors
    DecodeError,
    Decompressor,
    DictionaryError,
    // Core
    WordDictionary,
    WordEncoder,
    // Config
    WordlistRegistry,
    compress,
    decompress,
};
