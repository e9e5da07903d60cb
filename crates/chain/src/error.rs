//! Error taxonomy for chain assembly and terminal consumption.

use std::io;

use thiserror::Error;

/// Result alias used throughout the chain crate.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors surfaced while opening, decorating or consuming an input chain.
///
/// Falling back to the generic decompressor when a name has no registered
/// extension is policy, not an error, and never produces a value of this type.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The source could not produce its raw byte input.
    #[error("failed to open {name}: {source}")]
    SourceOpen {
        /// Human readable label of the source.
        name: String,
        /// Underlying open failure.
        #[source]
        source: io::Error,
    },
    /// A wrapper failed to initialise or a read failed after the source opened.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An object or document in the stream was malformed.
    #[error("malformed object in stream: {0}")]
    Deserialization(#[source] serde_json::Error),
    /// The requested charset label is not known.
    #[error("unsupported charset: {0:?}")]
    UnsupportedCharset(String),
    /// A lazy line sequence was used after it had been closed.
    #[error("line sequence used after close")]
    LinesClosed,
}

impl ChainError {
    /// Returns the underlying I/O error when the failure originated in I/O.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::SourceOpen { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::Deserialization(_) | Self::UnsupportedCharset(_) | Self::LinesClosed => None,
        }
    }
}

impl From<serde_json::Error> for ChainError {
    /// JSON errors caused by the underlying reader are reported as I/O
    /// failures so a corrupt compressed stream looks the same to every
    /// terminal.
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Deserialization(err)
        }
    }
}
