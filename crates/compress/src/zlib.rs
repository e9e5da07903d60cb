//! # Overview
//!
//! Deflate-family adapters built on [`flate2`]. Two containers are supported:
//! gzip (the built-in `gz` registry entry) and zlib (the generic fallback used
//! when a stream must be decompressed but its name carries no recognised
//! extension).
//!
//! # Examples
//!
//! ```
//! use compress::zlib::{CompressionLevel, gzip_to_vec, gunzip_to_vec};
//!
//! let data = b"highly compressible payload";
//! let compressed = gzip_to_vec(data, CompressionLevel::Best).unwrap();
//! let decoded = gunzip_to_vec(&compressed).unwrap();
//! assert_eq!(decoded, data);
//! ```

use std::{
    fmt,
    io::{self, Read, Write},
    num::NonZeroU8,
};

use flate2::{
    Compression,
    read::{MultiGzDecoder, ZlibDecoder},
    write::{GzEncoder, ZlibEncoder},
};

/// Compression levels recognised by the encoders.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum CompressionLevel {
    /// Favour speed over compression ratio.
    Fast,
    /// Use the codec's default balance between speed and ratio.
    #[default]
    Default,
    /// Favour the best possible compression ratio.
    Best,
    /// Use an explicit level in the range `1..=9`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Creates a [`CompressionLevel::Precise`] value from an explicit numeric level.
    ///
    /// The supplied `level` must fall within the inclusive range `1..=9`.
    pub fn from_numeric(level: u32) -> Result<Self, CompressionLevelError> {
        match u8::try_from(level).ok().and_then(NonZeroU8::new) {
            Some(precise) if precise.get() <= 9 => Ok(Self::Precise(precise)),
            _ => Err(CompressionLevelError::new(level)),
        }
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => Compression::fast(),
            CompressionLevel::Default => Compression::default(),
            CompressionLevel::Best => Compression::best(),
            CompressionLevel::Precise(value) => Compression::new(u32::from(value.get())),
        }
    }
}

/// Error returned when a requested compression level falls outside `1..=9`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressionLevelError {
    level: u32,
}

impl CompressionLevelError {
    const fn new(level: u32) -> Self {
        Self { level }
    }

    /// Returns the invalid compression level that triggered the error.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }
}

impl fmt::Display for CompressionLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compression level {} is outside the supported range 1-9",
            self.level
        )
    }
}

impl std::error::Error for CompressionLevelError {}

/// Wraps `reader` with a gzip decoder.
///
/// Concatenated gzip members are decoded back to back, matching the
/// behaviour of `gzip -d` on multi-member files.
pub fn gzip_decoder<R: Read>(reader: R) -> MultiGzDecoder<R> {
    MultiGzDecoder::new(reader)
}

/// Wraps `reader` with a zlib decoder.
pub fn zlib_decoder<R: Read>(reader: R) -> ZlibDecoder<R> {
    ZlibDecoder::new(reader)
}

/// Wraps `writer` with a gzip encoder. The trailer is written on drop.
pub fn gzip_encoder<W: Write>(writer: W, level: CompressionLevel) -> GzEncoder<W> {
    GzEncoder::new(writer, level.into())
}

/// Wraps `writer` with a zlib encoder. The trailer is written on drop.
pub fn zlib_encoder<W: Write>(writer: W, level: CompressionLevel) -> ZlibEncoder<W> {
    ZlibEncoder::new(writer, level.into())
}

/// Compresses `input` into a new zlib stream.
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = zlib_encoder(Vec::new(), level);
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses a zlib stream into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = zlib_decoder(input);
    let mut output = Vec::new();
    io::copy(&mut decoder, &mut output)?;
    Ok(output)
}

/// Compresses `input` into a new gzip member.
pub fn gzip_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = gzip_encoder(Vec::new(), level);
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses gzip data into a new [`Vec`].
pub fn gunzip_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = gzip_decoder(input);
    let mut output = Vec::new();
    io::copy(&mut decoder, &mut output)?;
    Ok(output)
}
