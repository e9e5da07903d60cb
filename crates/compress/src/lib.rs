#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` owns the codec side of stream chains: adapters that decorate a
//! byte stream with a decompressing reader or a compressing writer, and the
//! [`ExtensionRegistry`] that selects those adapters from a file name.
//!
//! # Design
//!
//! - [`wrapper`] defines the two capability traits, [`InputWrapper`] and
//!   [`OutputWrapper`], implemented for closures and for
//!   [`CompressionAlgorithm`].
//! - [`zlib`], `zstd` and `lz4` are thin adapters over
//!   [`flate2`](https://docs.rs/flate2), [`zstd`](https://docs.rs/zstd) and
//!   [`lz4_flex`](https://docs.rs/lz4_flex). The latter two are behind cargo
//!   features of the same name.
//! - [`registry`] maps extensions to wrappers and peels multi-extension names
//!   such as `data.tar.gz` right to left.
//!
//! # Invariants
//!
//! - Extensions are compared case-sensitively and stored without the leading
//!   dot.
//! - The default registry contains only `gz`. Other codecs are opt-in through
//!   [`ExtensionRegistry::register_algorithm`] or custom registration.
//! - Wrapped writers finish their stream when dropped.
//!
//! # Errors
//!
//! Every adapter returns [`std::io::Result`]. Corrupt or truncated input
//! surfaces from the first `read` that observes it.
//!
//! # Examples
//!
//! ```
//! use compress::{ExtensionRegistry, zlib::{CompressionLevel, gzip_to_vec}};
//! use std::io::{Cursor, Read};
//!
//! # fn main() -> std::io::Result<()> {
//! let registry = ExtensionRegistry::new();
//! let compressed = gzip_to_vec(b"payload", CompressionLevel::Default)?;
//!
//! let mut reader = registry.unwrap("payload.txt.gz", Box::new(Cursor::new(compressed)))?;
//! let mut text = String::new();
//! reader.read_to_string(&mut text)?;
//! assert_eq!(text, "payload");
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
#[cfg(feature = "lz4")]
pub mod lz4;
pub mod registry;
pub mod wrapper;
pub mod zlib;
#[cfg(feature = "zstd")]
pub mod zstd;

pub use algorithm::{CompressionAlgorithm, CompressionAlgorithmParseError};
pub use registry::ExtensionRegistry;
pub use wrapper::{
    BoxedReader, BoxedWriter, InputWrapper, OutputWrapper, SharedInputWrapper, SharedOutputWrapper,
};
pub use zlib::CompressionLevel;
