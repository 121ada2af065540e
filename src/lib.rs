//! Spell binary data out as dictionary words.
//!
//! Input is compressed, the compressed bytes are cut into fixed-width bit
//! windows sized to the dictionary, and each window picks a word. Runs of
//! repeated words fold into `count word` pairs.
//!
//! # Example
//!
//! ```
//! use word_d::{CompressionAlgorithm, WordEncoder, wordlists};
//!
//! let encoder = WordEncoder::new(wordlists::words1024())
//!     .unwrap()
//!     .with_compressor(CompressionAlgorithm::None);
//!
//! let words = encoder.encode(b"hello world").unwrap();
//! assert_eq!(words[0], "fast");
//! ```

mod core;
mod encoders;
mod features;

pub mod prelude;
pub mod wordlists;

pub use crate::core::config::{
    CompressionConfig, Settings, WordlistConfig, WordlistRegistry, WordlistSource,
};
pub use crate::core::word_dictionary::{WordDictionary, WordDictionaryBuilder};
pub use crate::encoders::algorithms::bit_reader::BitReader;
pub use crate::encoders::algorithms::errors::{
    BoxError, DecodeError, DictionaryError, WordlistNotFoundError, find_closest_wordlist,
};
pub use crate::encoders::algorithms::run_length::MIN_RUN_LENGTH;
pub use crate::encoders::algorithms::word::{
    MAX_DECODED_WORDS, MAX_RUN_LENGTH, WordEncoder, bits_for_size,
};
pub use crate::features::compression::{
    Compression, CompressionAlgorithm, Compressor, Decompressor, compress, decompress,
};
