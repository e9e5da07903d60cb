//! Producers of raw byte input.
//!
//! A [`Source`] is opened once per terminal call. Its optional name is only
//! used to sniff extensions for decompression, never to locate data.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use compress::BoxedReader;

use crate::charset::Charset;

/// Opaque producer of a raw byte input.
pub trait Source {
    /// Opens a fresh raw byte input.
    fn open(&self) -> io::Result<BoxedReader>;

    /// Returns the name used for extension sniffing, if the source has one.
    fn name(&self) -> Option<Cow<'_, str>>;

    /// Reports whether [`Source::name`] returns a value.
    fn has_name(&self) -> bool {
        self.name().is_some()
    }

    /// Returns a label for diagnostics. Defaults to the name.
    fn label(&self) -> Cow<'_, str> {
        self.name().unwrap_or(Cow::Borrowed("<unnamed source>"))
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn open(&self) -> io::Result<BoxedReader> {
        (**self).open()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        (**self).name()
    }

    fn label(&self) -> Cow<'_, str> {
        (**self).label()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn open(&self) -> io::Result<BoxedReader> {
        (**self).open()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        (**self).name()
    }

    fn label(&self) -> Cow<'_, str> {
        (**self).label()
    }
}

/// A file on the local filesystem.
///
/// The name is the final path component, so dots in directory names never
/// take part in extension sniffing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this source opens.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn open(&self) -> io::Result<BoxedReader> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.path.file_name().map(|name| name.to_string_lossy())
    }

    fn label(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

/// Named bytes compiled into the program, typically via `include_bytes!`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmbeddedSource {
    name: &'static str,
    data: &'static [u8],
}

impl EmbeddedSource {
    /// Creates a source over `data` identified by `name`.
    #[must_use]
    pub const fn new(name: &'static str, data: &'static [u8]) -> Self {
        Self { name, data }
    }

    /// Returns the embedded bytes.
    #[must_use]
    pub const fn data(&self) -> &'static [u8] {
        self.data
    }
}

impl Source for EmbeddedSource {
    fn open(&self) -> io::Result<BoxedReader> {
        Ok(Box::new(self.data))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.name))
    }
}

/// In-memory bytes, shared between every open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BytesSource {
    data: Arc<[u8]>,
    name: Option<String>,
}

impl BytesSource {
    /// Creates an unnamed source over `data`.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            data: data.into(),
            name: None,
        }
    }

    /// Attaches a name used for extension sniffing.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the bytes produced on every open.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Source for BytesSource {
    fn open(&self) -> io::Result<BoxedReader> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.name.as_deref().map(Cow::Borrowed)
    }

    fn label(&self) -> Cow<'_, str> {
        self.name
            .as_deref()
            .map_or(Cow::Borrowed("<in-memory bytes>"), Cow::Borrowed)
    }
}

/// Text stored as bytes in a caller-chosen charset.
///
/// Encoding follows `encoding_rs`: UTF-16 charsets encode as UTF-8 and
/// unmappable characters become numeric character references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringSource {
    bytes: BytesSource,
    charset: Charset,
}

impl StringSource {
    /// Stores `text` encoded as UTF-8.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self::encoded(text, Charset::utf8())
    }

    /// Stores `text` encoded with `charset`.
    pub fn encoded(text: impl AsRef<str>, charset: Charset) -> Self {
        let (bytes, _, _) = charset.encoding().encode(text.as_ref());
        Self {
            bytes: BytesSource::new(bytes.into_owned()),
            charset,
        }
    }

    /// Attaches a name used for extension sniffing.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.bytes = self.bytes.named(name);
        self
    }

    /// Returns the charset the text was encoded with.
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }
}

impl Source for StringSource {
    fn open(&self) -> io::Result<BoxedReader> {
        self.bytes.open()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.bytes.name()
    }

    fn label(&self) -> Cow<'_, str> {
        self.name().unwrap_or(Cow::Borrowed("<in-memory text>"))
    }
}

/// An already-open reader. It can be opened exactly once.
pub struct StreamSource {
    reader: Mutex<Option<BoxedReader>>,
    name: Option<String>,
}

impl StreamSource {
    /// Wraps an open reader.
    pub fn new(reader: impl io::Read + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Some(Box::new(reader))),
            name: None,
        }
    }

    /// Attaches a name used for extension sniffing.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reports whether the reader has already been handed out.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.reader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Source for StreamSource {
    fn open(&self) -> io::Result<BoxedReader> {
        self.reader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| io::Error::other("stream already consumed"))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.name.as_deref().map(Cow::Borrowed)
    }

    fn label(&self) -> Cow<'_, str> {
        self.name
            .as_deref()
            .map_or(Cow::Borrowed("<stream>"), Cow::Borrowed)
    }
}

impl fmt::Debug for StreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSource")
            .field("name", &self.name)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

/// A closure producing a fresh reader on every open.
pub struct FnSource<F> {
    open: F,
    name: Option<String>,
}

impl<F> FnSource<F>
where
    F: Fn() -> io::Result<BoxedReader>,
{
    /// Creates an unnamed source backed by `open`.
    pub fn new(open: F) -> Self {
        Self { open, name: None }
    }

    /// Attaches a name used for extension sniffing.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<F> Source for FnSource<F>
where
    F: Fn() -> io::Result<BoxedReader>,
{
    fn open(&self) -> io::Result<BoxedReader> {
        (self.open)()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.name.as_deref().map(Cow::Borrowed)
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
