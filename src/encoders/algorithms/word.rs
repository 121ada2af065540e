//! Word-based encoding using fixed-width bit windows.
//!
//! Input is compressed, the compressed bytes are cut into
//! `floor(log2(dictionary size))`-bit windows, and each window selects a
//! dictionary word. Runs of four or more identical words collapse into a
//! `count word` pair.

use super::bit_reader::BitReader;
use super::bit_writer::BitWriter;
use super::errors::{BoxError, DecodeError, DictionaryError};
use super::run_length::{self, Run, RunLengthEncoder};
use crate::core::word_dictionary::WordDictionary;
use crate::features::compression::{CompressionAlgorithm, Compressor, Decompressor};
use std::fmt;

/// Largest run a decoder will expand.
pub const MAX_RUN_LENGTH: u64 = 1 << 30;

/// Most words a decoder will expand across all runs of one input.
pub const MAX_DECODED_WORDS: u64 = 1 << 30;

/// Number of bits each word carries for a dictionary of `size` words.
///
/// # Errors
///
/// `TooSmall` below 2 words, `TooLarge` if the width would pass 64 bits.
pub fn bits_for_size(size: u128) -> Result<u32, DictionaryError> {
    if size < 2 {
        return Err(DictionaryError::TooSmall { size });
    }

    let bits = size.ilog2();
    if bits > 64 {
        return Err(DictionaryError::TooLarge { size });
    }
    Ok(bits)
}

/// Encodes binary data as a sequence of dictionary words.
///
/// Only the first `2^bits_per_word` words are reachable; any words past that
/// are carried but never emitted. The encoder holds no per-call state and can
/// be shared across threads.
///
/// # Example
///
/// ```
/// use word_d::{CompressionAlgorithm, WordEncoder};
///
/// let encoder = WordEncoder::from_words(["zero", "one", "two", "three"])
///     .unwrap()
///     .with_compressor(CompressionAlgorithm::None);
///
/// assert_eq!(encoder.bits_per_word(), 2);
/// // 0x1B = 00 01 10 11
/// assert_eq!(encoder.encode(&[0x1B]).unwrap(), vec!["zero", "one", "two", "three"]);
/// ```
pub struct WordEncoder {
    dictionary: WordDictionary,
    bits_per_word: u32,
    compressor: Box<dyn Compressor>,
}

impl WordEncoder {
    /// Wraps a dictionary, compressing with zlib at its best level.
    pub fn new(dictionary: WordDictionary) -> Result<Self, DictionaryError> {
        // usize never exceeds 2^64 words, so only TooSmall is reachable here
        let bits_per_word = bits_for_size(dictionary.len() as u128)?;

        Ok(Self {
            dictionary,
            bits_per_word,
            compressor: Box::new(CompressionAlgorithm::Zlib),
        })
    }

    /// Builds the dictionary and the encoder in one step.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(WordDictionary::builder().words(words).build()?)
    }

    /// Replaces the compressor.
    pub fn with_compressor(mut self, compressor: impl Compressor + 'static) -> Self {
        self.set_compressor(compressor);
        self
    }

    /// Replaces the compressor in place.
    pub fn set_compressor(&mut self, compressor: impl Compressor + 'static) {
        self.compressor = Box::new(compressor);
    }

    pub fn dictionary(&self) -> &WordDictionary {
        &self.dictionary
    }

    /// Bits consumed per emitted word.
    pub fn bits_per_word(&self) -> u32 {
        self.bits_per_word
    }

    /// Fraction of the dictionary that is reachable: `2^bits_per_word / len`.
    ///
    /// Exactly 1.0 when the dictionary size is a power of two.
    pub fn efficiency(&self) -> f64 {
        (1u128 << self.bits_per_word) as f64 / self.dictionary.len() as f64
    }

    /// Compresses `data` and spells the result out as word tokens.
    ///
    /// Tokens are dictionary words, except that a decimal count token
    /// precedes the word of every run of four or more.
    ///
    /// # Errors
    ///
    /// Returns the compressor's error unchanged.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<String>, BoxError> {
        let compressed = self.compressor.compress(data)?;
        let tokens = self.encode_compressed(&compressed);

        tracing::debug!(
            input_bytes = data.len(),
            compressed_bytes = compressed.len(),
            bits_per_word = self.bits_per_word,
            tokens = tokens.len(),
            "encoded"
        );

        Ok(tokens)
    }

    /// Like [`encode`](Self::encode), joined with the dictionary delimiter.
    pub fn encode_to_string(&self, data: &[u8]) -> Result<String, BoxError> {
        Ok(self.encode(data)?.join(self.dictionary.delimiter()))
    }

    fn encode_compressed(&self, compressed: &[u8]) -> Vec<String> {
        let reader = BitReader::new(compressed, self.bits_per_word);
        let mut runs = RunLengthEncoder::with_capacity(reader.len());

        for index in reader {
            // index < 2^bits_per_word <= len
            runs.push(self.dictionary.word_at(index as usize));
        }

        runs.finish()
    }

    /// Recovers the compressed byte stream from encoded text.
    ///
    /// Tokens may be separated by any whitespace or by the dictionary
    /// delimiter. A trailing partial byte is dropped, so the stream is exact
    /// whenever its bit length was a multiple of `bits_per_word`; otherwise
    /// the final, never-encoded bits are lost.
    ///
    /// # Errors
    ///
    /// - `NumericWord` if the dictionary contains a purely numeric word
    /// - `UnknownWord` for tokens outside the dictionary
    /// - `RunTooLong` for counts above [`MAX_RUN_LENGTH`]
    /// - `OutputTooLarge` once all runs together pass [`MAX_DECODED_WORDS`]
    pub fn decode_words(&self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        if let Some(word) = self.dictionary.numeric_word() {
            return Err(DecodeError::NumericWord {
                word: word.to_string(),
            });
        }

        let delimiter = self.dictionary.delimiter().trim();
        let tokens: Vec<&str> = encoded
            .split_whitespace()
            .flat_map(|chunk| {
                if delimiter.is_empty() {
                    vec![chunk]
                } else {
                    chunk.split(delimiter).filter(|t| !t.is_empty()).collect()
                }
            })
            .collect();

        // Resolve and bound every run before expanding any of them
        let mut resolved = Vec::with_capacity(tokens.len());
        let mut total: u64 = 0;

        for (position, run) in run_length::runs(&tokens, |t| self.dictionary.index_of(t).is_some())
        {
            let (count, word) = match run {
                Run::Repeat { count, word } => (count, word),
                Run::Single(word) => (1, word),
            };
            if count > MAX_RUN_LENGTH {
                return Err(DecodeError::RunTooLong { count, position });
            }
            total += count;
            if total > MAX_DECODED_WORDS {
                return Err(DecodeError::OutputTooLarge {
                    limit: MAX_DECODED_WORDS,
                    position,
                });
            }

            let index = self
                .dictionary
                .index_of(word)
                .filter(|&i| (i as u128) < (1u128 << self.bits_per_word))
                .ok_or_else(|| DecodeError::unknown_word(word, position, encoded))?;
            resolved.push((count, index as u64));
        }

        let mut writer = BitWriter::with_capacity(self.bits_per_word, total as usize);
        for (count, index) in resolved {
            for _ in 0..count {
                writer.write(index);
            }
        }

        let bytes = writer.finish();
        tracing::debug!(tokens = tokens.len(), bytes = bytes.len(), "decoded words");
        Ok(bytes)
    }

    /// Decodes text back to the original data with `decompressor`.
    pub fn decode(
        &self,
        encoded: &str,
        decompressor: &dyn Decompressor,
    ) -> Result<Vec<u8>, DecodeError> {
        let compressed = self.decode_words(encoded)?;
        decompressor
            .decompress(&compressed)
            .map_err(DecodeError::Decompression)
    }
}

impl fmt::Debug for WordEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordEncoder")
            .field("words", &self.dictionary.len())
            .field("bits_per_word", &self.bits_per_word)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(size: usize) -> Vec<String> {
        (0..size).map(|i| format!("w{}", i)).collect()
    }

    fn identity_encoder(words: Vec<String>) -> WordEncoder {
        WordEncoder::from_words(words)
            .unwrap()
            .with_compressor(CompressionAlgorithm::None)
    }

    #[test]
    fn test_bits_for_size() {
        assert_eq!(bits_for_size(2).unwrap(), 1);
        assert_eq!(bits_for_size(3).unwrap(), 1);
        assert_eq!(bits_for_size(1023).unwrap(), 9);
        assert_eq!(bits_for_size(1024).unwrap(), 10);
        assert_eq!(bits_for_size(u64::MAX as u128).unwrap(), 63);
        assert_eq!(bits_for_size(1 << 64).unwrap(), 64);
        assert_eq!(bits_for_size((1 << 65) - 1).unwrap(), 64);
    }

    #[test]
    fn test_bits_for_size_bounds() {
        assert_eq!(
            bits_for_size(0).unwrap_err(),
            DictionaryError::TooSmall { size: 0 }
        );
        assert_eq!(
            bits_for_size(1).unwrap_err(),
            DictionaryError::TooSmall { size: 1 }
        );
        assert_eq!(
            bits_for_size(1 << 65).unwrap_err(),
            DictionaryError::TooLarge { size: 1 << 65 }
        );
    }

    #[test]
    fn test_single_word_rejected() {
        let err = WordEncoder::from_words(["only"]).unwrap_err();
        assert_eq!(err, DictionaryError::TooSmall { size: 1 });
    }

    #[test]
    fn test_two_words_one_bit() {
        let encoder = identity_encoder(vec!["no".into(), "yes".into()]);
        assert_eq!(encoder.bits_per_word(), 1);
        assert_eq!(
            encoder.encode(&[0b1010_0000]).unwrap(),
            vec!["yes", "no", "yes", "5", "no"]
        );
    }

    #[test]
    fn test_efficiency() {
        assert_eq!(identity_encoder(numbered(1024)).efficiency(), 1.0);
        assert_eq!(identity_encoder(numbered(1000)).efficiency(), 0.512);
        assert_eq!(identity_encoder(numbered(3)).efficiency(), 2.0 / 3.0);
    }

    #[test]
    fn test_unreachable_tail_words() {
        // 5 words -> 2 bits; "w4" can never be produced
        let encoder = identity_encoder(numbered(5));
        let tokens = encoder.encode(&[0xFF, 0x1B, 0xE4]).unwrap();
        assert!(!tokens.iter().any(|t| t == "w4"));
    }

    #[test]
    fn test_run_thresholds() {
        let encoder = identity_encoder(numbered(16));
        // 0x33 = 0011 0011, nibble runs of w3
        assert_eq!(
            encoder.encode(&[0x12, 0x33, 0x31]).unwrap(),
            vec!["w1", "w2", "w3", "w3", "w3", "w1"]
        );
        assert_eq!(
            encoder.encode(&[0x12, 0x33, 0x33]).unwrap(),
            vec!["w1", "w2", "4", "w3"]
        );
        assert_eq!(encoder.encode(&[0x00; 50]).unwrap(), vec!["100", "w0"]);
    }

    #[test]
    fn test_empty_input() {
        let encoder = identity_encoder(numbered(1024));
        assert!(encoder.encode(b"").unwrap().is_empty());
        // One byte is shorter than a 10-bit window
        assert!(encoder.encode(b"x").unwrap().is_empty());
    }

    #[test]
    fn test_compressor_error_propagates() {
        let failing = |_: &[u8]| -> Result<Vec<u8>, BoxError> { Err("backend exploded".into()) };
        let encoder = WordEncoder::from_words(numbered(4))
            .unwrap()
            .with_compressor(failing);

        let err = encoder.encode(b"anything").unwrap_err();
        assert_eq!(err.to_string(), "backend exploded");
    }

    #[test]
    fn test_compressor_output_is_what_gets_encoded() {
        let fixed = |_: &[u8]| -> Result<Vec<u8>, BoxError> { Ok(vec![0x1B]) };
        let encoder = WordEncoder::from_words(["a", "b", "c", "d"])
            .unwrap()
            .with_compressor(fixed);
        assert_eq!(encoder.encode(b"ignored").unwrap(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_set_compressor_swaps() {
        let mut encoder = WordEncoder::from_words(numbered(256)).unwrap();
        let zlib = encoder.encode(b"hello").unwrap();
        encoder.set_compressor(CompressionAlgorithm::None);
        let plain = encoder.encode(b"hello").unwrap();

        assert_ne!(zlib, plain);
        assert_eq!(plain, vec!["w104", "w101", "w108", "w108", "w111"]);
    }

    #[test]
    fn test_encode_to_string_uses_delimiter() {
        let dict = WordDictionary::builder()
            .words(["a", "b", "c", "d"])
            .delimiter("-")
            .build()
            .unwrap();
        let encoder = WordEncoder::new(dict)
            .unwrap()
            .with_compressor(CompressionAlgorithm::None);
        assert_eq!(encoder.encode_to_string(&[0x1B]).unwrap(), "a-b-c-d");
        assert_eq!(encoder.decode_words("a-b-c-d").unwrap(), vec![0x1B]);
        assert_eq!(encoder.decode_words("a-b c\nd").unwrap(), vec![0x1B]);
    }

    #[test]
    fn test_deterministic() {
        let encoder = WordEncoder::from_words(numbered(1024)).unwrap();
        let data = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(encoder.encode(data).unwrap(), encoder.encode(data).unwrap());
    }

    #[test]
    fn test_decode_words_byte_aligned() {
        let encoder = identity_encoder(numbered(16));
        let data = b"\x00\x00\x00\x12\x34\xff";
        let text = encoder.encode_to_string(data).unwrap();
        assert!(text.starts_with("6 w0"));
        assert_eq!(encoder.decode_words(&text).unwrap(), data);
    }

    #[test]
    fn test_decode_drops_unencoded_tail() {
        // 3 bytes at 10 bits: 2 windows, 4 bits never encoded
        let encoder = identity_encoder(numbered(1024));
        let text = encoder.encode_to_string(&[0xAB, 0xCD, 0xEF]).unwrap();
        assert_eq!(encoder.decode_words(&text).unwrap(), vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_decode_unknown_word() {
        let encoder = identity_encoder(numbered(4));
        let err = encoder.decode_words("w0 w1 nope").unwrap_err();
        assert!(matches!(err, DecodeError::UnknownWord { position: 2, .. }));
    }

    #[test]
    fn test_decode_rejects_unreachable_word() {
        let encoder = identity_encoder(numbered(5));
        assert!(matches!(
            encoder.decode_words("w4 w0 w0 w0").unwrap_err(),
            DecodeError::UnknownWord { position: 0, .. }
        ));
    }

    #[test]
    fn test_decode_refuses_numeric_dictionary() {
        let encoder = identity_encoder(vec!["1".into(), "2".into(), "x".into(), "y".into()]);
        assert!(matches!(
            encoder.decode_words("x y").unwrap_err(),
            DecodeError::NumericWord { .. }
        ));
    }

    #[test]
    fn test_decode_run_limit() {
        let encoder = identity_encoder(numbered(4));
        let err = encoder.decode_words("99999999999 w1").unwrap_err();
        assert!(matches!(err, DecodeError::RunTooLong { position: 0, .. }));
    }

    #[test]
    fn test_decode_total_expansion_limit() {
        let encoder = identity_encoder(numbered(2));
        let max = MAX_RUN_LENGTH.to_string();

        // Each run is within the per-run limit; the second overflows the total
        assert!(matches!(
            encoder.decode_words(&format!("{} w1 {} w1", max, max)),
            Err(DecodeError::OutputTooLarge { position: 2, .. })
        ));

        let many = format!("{m} w1 {m} w0 {m} w1", m = max);
        assert!(matches!(
            encoder.decode_words(&many),
            Err(DecodeError::OutputTooLarge { .. })
        ));

        // Literal words count toward the total too
        let tail = format!("{} w1 w0", MAX_DECODED_WORDS);
        assert!(matches!(
            encoder.decode_words(&tail),
            Err(DecodeError::OutputTooLarge { position: 2, .. })
        ));
    }

    #[test]
    fn test_decode_with_zlib() {
        let encoder = WordEncoder::from_words(numbered(256)).unwrap();
        let data = b"byte aligned dictionaries decode losslessly";
        let text = encoder.encode_to_string(data).unwrap();
        let decoded = encoder.decode(&text, &CompressionAlgorithm::Zlib).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_decode_decompression_error() {
        let encoder = identity_encoder(numbered(256));
        let err = encoder
            .decode("w1 w2 w3", &CompressionAlgorithm::Zlib)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Decompression(_)));
    }

    #[test]
    fn test_encoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WordEncoder>();
    }
}
