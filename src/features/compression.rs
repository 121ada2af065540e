//! Compression backends and the pluggable compressor seam.
//!
//! The word encoder never looks inside compressed data: whatever bytes a
//! [`Compressor`] returns are fed straight into bit extraction. Any closure
//! with the right shape is a compressor, which keeps the encoder testable
//! with fakes.

use crate::encoders::algorithms::errors::BoxError;
use std::io::{Read, Write};

/// Turns a byte buffer into a (usually smaller) byte buffer.
///
/// Implementations must be deterministic and side-effect free so a single
/// encoder can be shared across threads.
pub trait Compressor: Send + Sync {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError>;
}

/// Inverse of a [`Compressor`], used when decoding.
pub trait Decompressor: Send + Sync {
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError>;
}

impl<F> Compressor for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        self(data)
    }
}

impl<F> Decompressor for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        self(data)
    }
}

/// Supported compression algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionAlgorithm {
    /// Identity: bytes pass through untouched
    None,
    Zlib,
    Gzip,
    Lzma,
    Zstd,
    Brotli,
    Lz4,
    Snappy,
}

impl CompressionAlgorithm {
    /// Every algorithm, in listing order.
    pub const ALL: [CompressionAlgorithm; 8] = [
        CompressionAlgorithm::None,
        CompressionAlgorithm::Zlib,
        CompressionAlgorithm::Gzip,
        CompressionAlgorithm::Lzma,
        CompressionAlgorithm::Zstd,
        CompressionAlgorithm::Brotli,
        CompressionAlgorithm::Lz4,
        CompressionAlgorithm::Snappy,
    ];

    /// Parse compression algorithm from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" | "identity" => Ok(CompressionAlgorithm::None),
            "zlib" => Ok(CompressionAlgorithm::Zlib),
            "gzip" | "gz" => Ok(CompressionAlgorithm::Gzip),
            "lzma" | "xz" => Ok(CompressionAlgorithm::Lzma),
            "zstd" | "zst" => Ok(CompressionAlgorithm::Zstd),
            "brotli" | "br" => Ok(CompressionAlgorithm::Brotli),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "snappy" | "snap" => Ok(CompressionAlgorithm::Snappy),
            _ => Err(format!("Unknown compression algorithm: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionAlgorithm::None => "none",
            CompressionAlgorithm::Zlib => "zlib",
            CompressionAlgorithm::Gzip => "gzip",
            CompressionAlgorithm::Lzma => "lzma",
            CompressionAlgorithm::Zstd => "zstd",
            CompressionAlgorithm::Brotli => "brotli",
            CompressionAlgorithm::Lz4 => "lz4",
            CompressionAlgorithm::Snappy => "snappy",
        }
    }

    /// Highest compression level the backend accepts.
    ///
    /// Algorithms without levels report 0.
    pub fn best_level(&self) -> u32 {
        match self {
            CompressionAlgorithm::Zlib | CompressionAlgorithm::Gzip => 9,
            CompressionAlgorithm::Lzma => 9,
            CompressionAlgorithm::Zstd => 22,
            CompressionAlgorithm::Brotli => 11,
            CompressionAlgorithm::None
            | CompressionAlgorithm::Lz4
            | CompressionAlgorithm::Snappy => 0,
        }
    }

    /// Pairs this algorithm with an explicit level.
    pub fn with_level(self, level: u32) -> Compression {
        Compression {
            algorithm: self,
            level,
        }
    }
}

impl std::fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bare algorithm compresses as hard as it can.
impl Compressor for CompressionAlgorithm {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        compress(data, *self, self.best_level())
    }
}

impl Decompressor for CompressionAlgorithm {
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        decompress(data, *self)
    }
}

/// An algorithm together with the level it runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compression {
    pub algorithm: CompressionAlgorithm,
    pub level: u32,
}

impl Compressor for Compression {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        compress(data, self.algorithm, self.level)
    }
}

impl Decompressor for Compression {
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        decompress(data, self.algorithm)
    }
}

/// Compress data using the specified algorithm and level.
pub fn compress(
    data: &[u8],
    algorithm: CompressionAlgorithm,
    level: u32,
) -> Result<Vec<u8>, BoxError> {
    match algorithm {
        CompressionAlgorithm::None => Ok(data.to_vec()),
        CompressionAlgorithm::Zlib => compress_zlib(data, level),
        CompressionAlgorithm::Gzip => compress_gzip(data, level),
        CompressionAlgorithm::Lzma => compress_lzma(data, level),
        CompressionAlgorithm::Zstd => compress_zstd(data, level),
        CompressionAlgorithm::Brotli => compress_brotli(data, level),
        CompressionAlgorithm::Lz4 => compress_lz4(data),
        CompressionAlgorithm::Snappy => compress_snappy(data),
    }
}

/// Decompress data using the specified algorithm.
pub fn decompress(data: &[u8], algorithm: CompressionAlgorithm) -> Result<Vec<u8>, BoxError> {
    match algorithm {
        CompressionAlgorithm::None => Ok(data.to_vec()),
        CompressionAlgorithm::Zlib => decompress_zlib(data),
        CompressionAlgorithm::Gzip => decompress_gzip(data),
        CompressionAlgorithm::Lzma => decompress_lzma(data),
        CompressionAlgorithm::Zstd => decompress_zstd(data),
        CompressionAlgorithm::Brotli => decompress_brotli(data),
        CompressionAlgorithm::Lz4 => decompress_lz4(data),
        CompressionAlgorithm::Snappy => decompress_snappy(data),
    }
}

fn compress_zlib(data: &[u8], level: u32) -> Result<Vec<u8>, BoxError> {
    use flate2::write::ZlibEncoder;

    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn decompress_zlib(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    use flate2::read::ZlibDecoder;

    let mut decoder = ZlibDecoder::new(data);
    let mut result = Vec::new();
    decoder.read_to_end(&mut result)?;
    Ok(result)
}

fn compress_gzip(data: &[u8], level: u32) -> Result<Vec<u8>, BoxError> {
    use flate2::write::GzEncoder;

    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::new(level.min(9)));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(data);
    let mut result = Vec::new();
    decoder.read_to_end(&mut result)?;
    Ok(result)
}

fn compress_brotli(data: &[u8], level: u32) -> Result<Vec<u8>, BoxError> {
    let mut result = Vec::new();
    let mut reader = brotli::CompressorReader::new(data, 4096, level.min(11), 22);
    reader.read_to_end(&mut result)?;
    Ok(result)
}

fn decompress_brotli(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    let mut result = Vec::new();
    let mut reader = brotli::Decompressor::new(data, 4096);
    reader.read_to_end(&mut result)?;
    Ok(result)
}

fn compress_snappy(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    // Snappy doesn't support compression levels
    let mut encoder = snap::raw::Encoder::new();
    Ok(encoder.compress_vec(data)?)
}

fn decompress_snappy(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    let mut decoder = snap::raw::Decoder::new();
    Ok(decoder.decompress_vec(data)?)
}

#[cfg(feature = "native-compression")]
fn compress_lzma(data: &[u8], level: u32) -> Result<Vec<u8>, BoxError> {
    use xz2::write::XzEncoder;

    let mut encoder = XzEncoder::new(Vec::new(), level.min(9));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(feature = "native-compression")]
fn decompress_lzma(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    use xz2::read::XzDecoder;

    let mut decoder = XzDecoder::new(data);
    let mut result = Vec::new();
    decoder.read_to_end(&mut result)?;
    Ok(result)
}

#[cfg(feature = "native-compression")]
fn compress_zstd(data: &[u8], level: u32) -> Result<Vec<u8>, BoxError> {
    Ok(zstd::encode_all(data, level.min(22) as i32)?)
}

#[cfg(feature = "native-compression")]
fn decompress_zstd(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    Ok(zstd::decode_all(data)?)
}

#[cfg(feature = "native-compression")]
fn compress_lz4(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    // Size-prefixed so the block can be decompressed without side information
    Ok(lz4::block::compress(data, None, true)?)
}

#[cfg(feature = "native-compression")]
fn decompress_lz4(data: &[u8]) -> Result<Vec<u8>, BoxError> {
    Ok(lz4::block::decompress(data, None)?)
}

#[cfg(not(feature = "native-compression"))]
fn native_unavailable(algorithm: CompressionAlgorithm) -> BoxError {
    format!(
        "{} support requires the `native-compression` feature",
        algorithm
    )
    .into()
}

#[cfg(not(feature = "native-compression"))]
fn compress_lzma(_data: &[u8], _level: u32) -> Result<Vec<u8>, BoxError> {
    Err(native_unavailable(CompressionAlgorithm::Lzma))
}

#[cfg(not(feature = "native-compression"))]
fn decompress_lzma(_data: &[u8]) -> Result<Vec<u8>, BoxError> {
    Err(native_unavailable(CompressionAlgorithm::Lzma))
}

#[cfg(not(feature = "native-compression"))]
fn compress_zstd(_data: &[u8], _level: u32) -> Result<Vec<u8>, BoxError> {
    Err(native_unavailable(CompressionAlgorithm::Zstd))
}

#[cfg(not(feature = "native-compression"))]
fn decompress_zstd(_data: &[u8]) -> Result<Vec<u8>, BoxError> {
    Err(native_unavailable(CompressionAlgorithm::Zstd))
}

#[cfg(not(feature = "native-compression"))]
fn compress_lz4(_data: &[u8]) -> Result<Vec<u8>, BoxError> {
    Err(native_unavailable(CompressionAlgorithm::Lz4))
}

#[cfg(not(feature = "native-compression"))]
fn decompress_lz4(_data: &[u8]) -> Result<Vec<u8>, BoxError> {
    Err(native_unavailable(CompressionAlgorithm::Lz4))
}
