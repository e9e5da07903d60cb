//! Enumeration of the codecs this crate can adapt into stream wrappers.

use core::fmt;
use core::str::FromStr;
use std::io;

use crate::wrapper::{BoxedReader, BoxedWriter, InputWrapper, OutputWrapper};
use crate::zlib::{self, CompressionLevel};

/// Compression algorithms with built-in wrapper adapters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CompressionAlgorithm {
    /// gzip container around deflate data (RFC 1952).
    Gzip,
    /// zlib container around deflate data (RFC 1950).
    Zlib,
    /// Zstandard frames.
    #[cfg(feature = "zstd")]
    Zstd,
    /// LZ4 frames.
    #[cfg(feature = "lz4")]
    Lz4,
}

impl CompressionAlgorithm {
    /// Returns the canonical display name used for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Zlib => "zlib",
            #[cfg(feature = "zstd")]
            Self::Zstd => "zstd",
            #[cfg(feature = "lz4")]
            Self::Lz4 => "lz4",
        }
    }

    /// Returns the file extension, without a leading dot, conventionally used
    /// for streams produced by this algorithm.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Zlib => "zz",
            #[cfg(feature = "zstd")]
            Self::Zstd => "zst",
            #[cfg(feature = "lz4")]
            Self::Lz4 => "lz4",
        }
    }

    /// Returns the algorithm used when a stream must be decompressed but its
    /// name offers no usable extension.
    #[must_use]
    pub const fn fallback() -> Self {
        Self::Zlib
    }

    /// Returns the set of algorithms available in the current build.
    #[must_use]
    pub fn available() -> &'static [Self] {
        const ALGORITHMS: &[CompressionAlgorithm] = &[
            CompressionAlgorithm::Gzip,
            CompressionAlgorithm::Zlib,
            #[cfg(feature = "zstd")]
            CompressionAlgorithm::Zstd,
            #[cfg(feature = "lz4")]
            CompressionAlgorithm::Lz4,
        ];
        ALGORITHMS
    }

    /// Looks up the algorithm whose canonical extension equals `extension`.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::available()
            .iter()
            .copied()
            .find(|algorithm| algorithm.extension() == extension)
    }

    /// Wraps `reader` with the decoder for this algorithm.
    pub fn decoder(self, reader: BoxedReader) -> io::Result<BoxedReader> {
        match self {
            Self::Gzip => Ok(Box::new(zlib::gzip_decoder(reader))),
            Self::Zlib => Ok(Box::new(zlib::zlib_decoder(reader))),
            #[cfg(feature = "zstd")]
            Self::Zstd => Ok(Box::new(crate::zstd::decoder(reader)?)),
            #[cfg(feature = "lz4")]
            Self::Lz4 => Ok(Box::new(crate::lz4::decoder(reader))),
        }
    }

    /// Wraps `writer` with the encoder for this algorithm.
    ///
    /// The returned writer finishes the compressed stream when dropped.
    pub fn encoder(self, writer: BoxedWriter, level: CompressionLevel) -> io::Result<BoxedWriter> {
        match self {
            Self::Gzip => Ok(Box::new(zlib::gzip_encoder(writer, level))),
            Self::Zlib => Ok(Box::new(zlib::zlib_encoder(writer, level))),
            #[cfg(feature = "zstd")]
            Self::Zstd => Ok(Box::new(crate::zstd::encoder(writer, level)?)),
            #[cfg(feature = "lz4")]
            Self::Lz4 => Ok(Box::new(crate::lz4::encoder(writer, level))),
        }
    }
}

impl InputWrapper for CompressionAlgorithm {
    fn wrap(&self, input: BoxedReader) -> io::Result<BoxedReader> {
        self.decoder(input)
    }
}

impl OutputWrapper for CompressionAlgorithm {
    fn wrap(&self, output: BoxedWriter) -> io::Result<BoxedWriter> {
        self.encoder(output, CompressionLevel::Default)
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when attempting to parse an unsupported compression algorithm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompressionAlgorithmParseError {
    input: String,
}

impl CompressionAlgorithmParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for CompressionAlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported compression algorithm: {}", self.input)
    }
}

impl std::error::Error for CompressionAlgorithmParseError {}

impl FromStr for CompressionAlgorithm {
    type Err = CompressionAlgorithmParseError;

    /// Accepts either the display name or the canonical extension.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::available()
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == normalized || algorithm.extension() == normalized)
            .ok_or_else(|| CompressionAlgorithmParseError::new(normalized))
    }
}
