#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `streamchain` builds input pipelines fluently: pick a source, choose which
//! decorators to apply, then consume the result in the shape you need.
//!
//! ```
//! # fn main() -> streamchain::ChainResult<()> {
//! let text = streamchain::string("alpha\r\nbeta")
//!     .with_utf8()
//!     .read_all()?;
//! assert_eq!(text, "alpha\nbeta");
//! # Ok(())
//! # }
//! ```
//!
//! # Entry points
//!
//! | Function | Source |
//! |----------|--------|
//! | [`file`] | a path on the local filesystem |
//! | [`resource`] | named bytes compiled into the binary |
//! | [`string`] | text, stored as UTF-8 |
//! | [`bytes`] | in-memory bytes |
//! | [`stream`] | an already-open reader, consumable once |
//! | [`source`] | any [`Source`] implementation |
//!
//! # Decompression
//!
//! [`InputBuilder::decompress`] consults an [`ExtensionRegistry`], by default
//! the process-wide [`ExtensionRegistry::global`]. Names are peeled right to
//! left, so `logs.tar.gz` is gunzipped first and then handed to any `tar`
//! wrapper you registered. Names without a registered extension are
//! decompressed as zlib.
//!
//! ```
//! use std::io::{self, Read};
//! use std::sync::Arc;
//! use streamchain::{BoxedReader, BytesSource, ExtensionRegistry};
//!
//! # fn main() -> streamchain::ChainResult<()> {
//! let upper = |mut input: BoxedReader| -> io::Result<BoxedReader> {
//!     let mut text = String::new();
//!     input.read_to_string(&mut text)?;
//!     Ok(Box::new(io::Cursor::new(text.to_uppercase().into_bytes())))
//! };
//! let registry = Arc::new(ExtensionRegistry::new());
//! registry.register_input("upper", upper);
//!
//! let text = streamchain::source(BytesSource::new(b"shout".to_vec()).named("msg.upper"))
//!     .with_registry(registry)
//!     .with_utf8()
//!     .decompress()
//!     .read_all()?;
//! assert_eq!(text, "SHOUT");
//! # Ok(())
//! # }
//! ```
//!
//! # Diagnostics
//!
//! Library code emits `tracing` events under the `streamchain::` targets.
//! With the `subscriber` feature, `logging::init_tracing` installs a
//! formatter filtered by `STREAMCHAIN_LOG`.

use std::io::Read;
use std::path::PathBuf;

pub use chain::{
    Base64Variant, BytesSource, CHARSET_ENV, ChainConfig, ChainError, ChainResult, Charset,
    CharsetReader, EmbeddedSource, FileSource, FnSource, InputBuilder, Lines, ObjectStream,
    Pipeline, Source, StreamSource, StringSource, TextReader,
};
pub use compress::{
    BoxedReader, BoxedWriter, CompressionAlgorithm, CompressionLevel, ExtensionRegistry,
    InputWrapper, OutputWrapper, SharedInputWrapper, SharedOutputWrapper,
};
pub use logging;

/// Starts a chain over the file at `path`.
///
/// The final path component is used for extension sniffing.
pub fn file(path: impl Into<PathBuf>) -> InputBuilder<FileSource> {
    InputBuilder::new(FileSource::new(path))
}

/// Starts a chain over bytes bundled with the program.
///
/// ```
/// let builder = streamchain::resource("greeting.txt", b"hello");
/// assert_eq!(builder.with_utf8().read_all().unwrap(), "hello");
/// ```
pub fn resource(name: &'static str, data: &'static [u8]) -> InputBuilder<EmbeddedSource> {
    InputBuilder::new(EmbeddedSource::new(name, data))
}

/// Starts a chain over `text` encoded as UTF-8.
pub fn string(text: impl AsRef<str>) -> InputBuilder<StringSource> {
    InputBuilder::new(StringSource::new(text))
}

/// Starts a chain over in-memory bytes.
pub fn bytes(data: impl Into<std::sync::Arc<[u8]>>) -> InputBuilder<BytesSource> {
    InputBuilder::new(BytesSource::new(data))
}

/// Starts a chain over an open reader. Only the first terminal call succeeds.
pub fn stream(reader: impl Read + Send + 'static) -> InputBuilder<StreamSource> {
    InputBuilder::new(StreamSource::new(reader))
}

/// Starts a chain over any [`Source`].
pub fn source<S: Source>(source: S) -> InputBuilder<S> {
    InputBuilder::new(source)
}
