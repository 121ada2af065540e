//! Public API tests for the word encoder.

use word_d::{
    BitReader, BoxError, Compression, CompressionAlgorithm, DecodeError, DictionaryError,
    MAX_RUN_LENGTH, MIN_RUN_LENGTH, WordDictionary, WordEncoder, bits_for_size, wordlists,
};

fn numbered(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("word{}", i)).collect()
}

fn identity(words: Vec<String>) -> WordEncoder {
    WordEncoder::from_words(words)
        .unwrap()
        .with_compressor(CompressionAlgorithm::None)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_bits_per_word_from_size() {
    assert_eq!(identity(numbered(1024)).bits_per_word(), 10);
    assert_eq!(identity(numbered(1023)).bits_per_word(), 9);
    assert_eq!(identity(numbered(2)).bits_per_word(), 1);
}

#[test]
fn test_construction_boundaries() {
    assert!(matches!(
        WordEncoder::from_words(["solo"]),
        Err(DictionaryError::TooSmall { size: 1 })
    ));
    assert!(WordEncoder::from_words(["heads", "tails"]).is_ok());
    assert!(matches!(
        bits_for_size(1u128 << 65),
        Err(DictionaryError::TooLarge { .. })
    ));
}

#[test]
fn test_dictionary_text_order_preserved() {
    let dict = WordDictionary::from_text("gamma alpha\nbeta delta").unwrap();
    let encoder = WordEncoder::new(dict)
        .unwrap()
        .with_compressor(CompressionAlgorithm::None);
    // 0x1B -> 00 01 10 11
    assert_eq!(
        encoder.encode(&[0x1B]).unwrap(),
        vec!["gamma", "alpha", "beta", "delta"]
    );
}

// ============================================================================
// Bit extraction
// ============================================================================

#[test]
fn test_bit_reader_exactness() {
    let nibbles: Vec<u64> = BitReader::new(&[0b1011_0100], 4).collect();
    assert_eq!(nibbles, vec![11, 4]);

    let triples: Vec<u64> = BitReader::new(&[0b1011_0100], 3).collect();
    assert_eq!(triples, vec![5, 5]);

    let bits: Vec<u64> = BitReader::new(&[0x80], 1).collect();
    assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_identity_consumes_whole_windows() {
    // With no compression and no runs, one token per whole window
    let encoder = identity(numbered(1024));
    let data: Vec<u8> = (0..=255u8).collect();
    let tokens = encoder.encode(&data).unwrap();
    assert_eq!(tokens.len(), data.len() * 8 / 10);
}

// ============================================================================
// Run-length folding
// ============================================================================

/// Encoder over 256 numbered words whose "compressor" always yields `bytes`.
fn fixed_output(bytes: Vec<u8>) -> WordEncoder {
    WordEncoder::from_words(numbered(256))
        .unwrap()
        .with_compressor(move |_: &[u8]| -> Result<Vec<u8>, BoxError> { Ok(bytes.clone()) })
}

#[test]
fn test_run_thresholds() {
    assert_eq!(MIN_RUN_LENGTH, 4);

    let three = fixed_output(vec![7, 7, 7]);
    assert_eq!(three.encode(b"").unwrap(), vec!["word7"; 3]);

    let four = fixed_output(vec![7; 4]);
    assert_eq!(four.encode(b"").unwrap(), vec!["4", "word7"]);

    let hundred = fixed_output(vec![7; 100]);
    assert_eq!(hundred.encode(b"").unwrap(), vec!["100", "word7"]);

    let split = fixed_output(vec![7, 7, 7, 7, 8, 7]);
    assert_eq!(
        split.encode(b"").unwrap(),
        vec!["4", "word7", "word8", "word7"]
    );
}

// ============================================================================
// Efficiency
// ============================================================================

#[test]
fn test_efficiency() {
    assert_eq!(identity(numbered(1024)).efficiency(), 1.0);
    assert_eq!(identity(numbered(1000)).efficiency(), 0.512);

    let value = identity(numbered(1536)).efficiency();
    assert!(value > 0.0 && value <= 1.0);
}

// ============================================================================
// Compressors
// ============================================================================

#[test]
fn test_compressor_failure_propagates_verbatim() {
    let encoder = WordEncoder::from_words(numbered(16))
        .unwrap()
        .with_compressor(|_: &[u8]| -> Result<Vec<u8>, BoxError> {
            Err(std::io::Error::other("disk on fire").into())
        });

    let err = encoder.encode(b"payload").unwrap_err();
    assert_eq!(err.to_string(), "disk on fire");
    assert!(err.downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn test_reference_compressors_interchangeable() {
    let data = b"the same input through every reference compressor, the same input";
    let mut encoder = WordEncoder::new(wordlists::builtin("words256").unwrap()).unwrap();

    #[allow(unused_mut)]
    let mut compressors = vec![
        CompressionAlgorithm::None.with_level(0),
        CompressionAlgorithm::Zlib.with_level(9),
        CompressionAlgorithm::Gzip.with_level(9),
    ];
    #[cfg(feature = "native-compression")]
    compressors.push(CompressionAlgorithm::Lzma.with_level(6));

    for compression in compressors {
        encoder.set_compressor(compression);
        let text = encoder.encode_to_string(data).unwrap();
        let decoded = encoder.decode(&text, &compression).unwrap();
        assert_eq!(decoded, data, "{}", compression.algorithm);
    }
}

#[test]
fn test_compression_shrinks_repetitive_input() {
    let data = "abcdefgh".repeat(200);
    let plain = identity(numbered(1024)).encode(data.as_bytes()).unwrap();
    let zlib = WordEncoder::from_words(numbered(1024))
        .unwrap()
        .encode(data.as_bytes())
        .unwrap();
    assert!(zlib.len() < plain.len());
}

#[test]
fn test_compression_struct_uses_its_level() {
    let data = "level matters ".repeat(50);
    let fast = Compression {
        algorithm: CompressionAlgorithm::Zlib,
        level: 0,
    };
    let encoder = WordEncoder::from_words(numbered(256))
        .unwrap()
        .with_compressor(fast);
    let text = encoder.encode_to_string(data.as_bytes()).unwrap();
    assert_eq!(encoder.decode(&text, &fast).unwrap(), data.as_bytes());
}

// ============================================================================
// Decoding limits
// ============================================================================

#[test]
fn test_custom_delimiter_round_trip() {
    let rejected = WordDictionary::builder()
        .words(["well-known", "b", "c", "d"])
        .delimiter("-")
        .build();
    assert!(matches!(
        rejected,
        Err(DictionaryError::InvalidWord { index: 0, .. })
    ));

    let dict = WordDictionary::builder()
        .words(["well_known", "b", "c", "d"])
        .delimiter("-")
        .build()
        .unwrap();
    let encoder = WordEncoder::new(dict)
        .unwrap()
        .with_compressor(CompressionAlgorithm::None);
    let text = encoder.encode_to_string(&[0x1B]).unwrap();
    assert_eq!(text, "well_known-b-c-d");
    assert_eq!(encoder.decode_words(&text).unwrap(), vec![0x1B]);
}

#[test]
fn test_many_maximal_runs_rejected() {
    let encoder = identity(numbered(2));
    let text = format!("{m} word1 {m} word1 {m} word1", m = MAX_RUN_LENGTH);
    assert!(matches!(
        encoder.decode_words(&text),
        Err(DecodeError::OutputTooLarge { .. })
    ));
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_hello_world_golden() {
    let encoder = WordEncoder::new(wordlists::words1024())
        .unwrap()
        .with_compressor(CompressionAlgorithm::None);
    assert_eq!(
        encoder.encode(b"hello world").unwrap(),
        vec!["fast", "most", "sign", "beef", "bitter", "teeth", "which", "noon"]
    );
}

#[test]
fn test_leading_zero_run_golden() {
    let encoder = WordEncoder::new(wordlists::words1024())
        .unwrap()
        .with_compressor(CompressionAlgorithm::None);
    let mut data = vec![0u8; 40];
    data.extend_from_slice(b"hi");
    assert_eq!(encoder.encode(&data).unwrap(), vec!["32", "a", "fast"]);
}

#[test]
fn test_empty_input() {
    let encoder = identity(numbered(1024));
    assert!(encoder.encode(b"").unwrap().is_empty());
    assert_eq!(encoder.encode_to_string(b"").unwrap(), "");
}

#[test]
fn test_encoder_reusable_and_deterministic() {
    let encoder = WordEncoder::new(wordlists::words1024()).unwrap();
    let inputs: [&[u8]; 3] = [b"one", b"two two", b"three three three"];

    let first: Vec<_> = inputs.iter().map(|i| encoder.encode(i).unwrap()).collect();
    let second: Vec<_> = inputs.iter().map(|i| encoder.encode(i).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_encodes_share_encoder() {
    let encoder = WordEncoder::new(wordlists::words1024()).unwrap();
    let expected = encoder.encode(b"shared across threads").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| encoder.encode(b"shared across threads").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
