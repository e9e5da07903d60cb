#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `chain` assembles input pipelines. A [`Source`] supplies raw bytes, an
//! [`InputBuilder`] records which decorators to apply, and a terminal call
//! opens the source and consumes the decorated stream in the requested shape.
//!
//! # Design
//!
//! - [`source`] holds the [`Source`] trait and its file, embedded, in-memory,
//!   stream and closure implementations.
//! - [`builder`] performs assembly. Decompression is delegated to the
//!   [`compress::ExtensionRegistry`] held by the builder, with zlib as the
//!   fallback when the source name has no registered extension.
//! - [`base64`](crate::base64) and [`charset`] provide the remaining layers.
//! - [`text`], [`lines`] and [`objects`] are the handle-returning terminals.
//!
//! # Invariants
//!
//! - Setters never perform I/O. Each terminal call opens the source once.
//! - Layers are applied in the order source, decompression, base64, charset.
//! - Text terminals always produce UTF-8 whatever the source charset.
//!
//! # Errors
//!
//! Terminals return [`ChainResult`]. Open failures carry the source label in
//! [`ChainError::SourceOpen`]; failures inside the decorated stream are
//! [`ChainError::Io`].
//!
//! # Examples
//!
//! ```
//! use chain::{InputBuilder, StringSource};
//!
//! let lines = InputBuilder::new(StringSource::new("alpha\r\nbeta\n"))
//!     .with_utf8()
//!     .read_lines()
//!     .unwrap();
//! assert_eq!(lines, ["alpha", "beta"]);
//! ```

pub mod base64;
pub mod builder;
pub mod charset;
pub mod config;
pub mod error;
pub mod lines;
pub mod objects;
pub mod pipeline;
pub mod source;
pub mod text;

pub use crate::base64::Base64Variant;
pub use builder::InputBuilder;
pub use charset::{CHARSET_ENV, Charset, CharsetReader};
pub use config::ChainConfig;
pub use error::{ChainError, ChainResult};
pub use lines::Lines;
pub use objects::ObjectStream;
pub use pipeline::Pipeline;
pub use source::{BytesSource, EmbeddedSource, FileSource, FnSource, Source, StreamSource, StringSource};
pub use text::TextReader;
