//! Fluent assembly of input chains.
//!
//! An [`InputBuilder`] records options without touching its source. Each
//! terminal call opens the source afresh and decorates it in a fixed order:
//!
//! 1. raw source
//! 2. decompression, selected by the registry from the source name or
//!    falling back to zlib
//! 3. base64 decoding
//! 4. charset decoding, for text terminals only
//!
//! Terminals that return a handle ([`InputBuilder::as_stream`],
//! [`InputBuilder::as_reader`], [`InputBuilder::stream_lines`], ...) hand
//! ownership of the chain to the caller. All other terminals release the
//! chain before returning, on success and on error.

use std::fmt;
use std::io::{self, BufReader, Read, Write};
use std::sync::Arc;

use compress::{CompressionAlgorithm, ExtensionRegistry};
use logging::{trace_chain, trace_source};
use serde::de::DeserializeOwned;

use crate::base64::Base64Variant;
use crate::charset::{Charset, CharsetReader};
use crate::config::ChainConfig;
use crate::error::{ChainError, ChainResult};
use crate::lines::Lines;
use crate::objects::ObjectStream;
use crate::pipeline::Pipeline;
use crate::source::Source;
use crate::text::TextReader;

const TEXT_CHUNK: usize = 8 * 1024;

/// Fluent builder of decorated input chains over a [`Source`].
pub struct InputBuilder<S> {
    source: S,
    registry: Arc<ExtensionRegistry>,
    config: ChainConfig,
}

impl<S: Source> InputBuilder<S> {
    /// Creates a builder over `source` using the global registry and the
    /// platform default charset.
    pub fn new(source: S) -> Self {
        Self {
            source,
            registry: ExtensionRegistry::global(),
            config: ChainConfig::default(),
        }
    }

    /// Substitutes the registry used to select decompressors.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ExtensionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Requests decompression of the raw stream.
    #[must_use]
    pub fn decompress(mut self) -> Self {
        self.config = self.config.with_decompress();
        self
    }

    /// Requests standard base64 decoding after decompression.
    #[must_use]
    pub fn decode_base64(self) -> Self {
        self.decode_base64_with(Base64Variant::Standard)
    }

    /// Requests base64 decoding with the given variant.
    #[must_use]
    pub fn decode_base64_with(mut self, variant: Base64Variant) -> Self {
        self.config = self.config.with_base64(variant);
        self
    }

    /// Sets the charset used by text terminals.
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.config = self.config.with_charset(charset);
        self
    }

    /// Shorthand for `with_charset(Charset::utf8())`.
    #[must_use]
    pub fn with_utf8(self) -> Self {
        self.with_charset(Charset::utf8())
    }

    /// Sets the charset by label, failing on unknown labels.
    pub fn with_charset_label(self, label: &str) -> ChainResult<Self> {
        let charset = Charset::for_label(label)?;
        Ok(self.with_charset(charset))
    }

    /// Returns the current options.
    #[must_use]
    pub const fn config(&self) -> ChainConfig {
        self.config
    }

    /// Returns the source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the registry used to select decompressors.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ExtensionRegistry> {
        &self.registry
    }

    /// Opens the source and applies the configured byte decorators.
    fn open_pipeline(&self) -> ChainResult<Pipeline> {
        let label = self.source.label().into_owned();
        let mut stream = self
            .source
            .open()
            .map_err(|source| ChainError::SourceOpen {
                name: label.clone(),
                source,
            })?;
        trace_source!(source = label.as_str(), "opened source");

        if self.config.decompress() {
            stream = match self.source.name() {
                Some(name) if self.registry.can_unwrap(&name) => {
                    trace_chain!(source = label.as_str(), "decompressing by extension");
                    self.registry.unwrap(&name, stream)?
                }
                _ => {
                    let fallback = CompressionAlgorithm::fallback();
                    trace_chain!(
                        source = label.as_str(),
                        algorithm = fallback.name(),
                        "no registered extension, using fallback decompressor"
                    );
                    fallback.decoder(stream)?
                }
            };
        }

        if let Some(variant) = self.config.base64() {
            trace_chain!(source = label.as_str(), ?variant, "decoding base64");
            stream = variant.decoder(stream);
        }

        Ok(Pipeline::new(stream, label))
    }

    /// Returns the decorated byte stream.
    pub fn as_stream(&self) -> ChainResult<Pipeline> {
        self.open_pipeline()
    }

    /// Returns a buffered reader decoding the configured charset.
    pub fn as_reader(&self) -> ChainResult<TextReader> {
        Ok(TextReader::new(self.open_pipeline()?, self.config.charset()))
    }

    /// Returns an iterator over the framed objects in the stream.
    pub fn as_objects<T: DeserializeOwned>(&self) -> ChainResult<ObjectStream<T>> {
        Ok(ObjectStream::new(self.open_pipeline()?))
    }

    /// Reads the first object of the stream.
    ///
    /// An empty stream is an [`io::ErrorKind::UnexpectedEof`] error.
    pub fn read_object<T: DeserializeOwned>(&self) -> ChainResult<T> {
        self.as_objects::<T>()?.next().unwrap_or_else(|| {
            Err(ChainError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream contains no object",
            )))
        })
    }

    /// Reads every object until the stream is exhausted.
    pub fn read_objects<T: DeserializeOwned>(&self) -> ChainResult<Vec<T>> {
        self.as_objects::<T>()?.collect()
    }

    /// Parses the stream as exactly one JSON document.
    ///
    /// Anything but whitespace after the document is an error.
    pub fn read_document(&self) -> ChainResult<serde_json::Value> {
        let pipeline = self.open_pipeline()?;
        Ok(serde_json::from_reader(BufReader::new(pipeline))?)
    }

    /// Returns a tar archive reader; entries are advanced sequentially.
    pub fn as_archive(&self) -> ChainResult<tar::Archive<Pipeline>> {
        Ok(tar::Archive::new(self.open_pipeline()?))
    }

    /// Reads all lines and joins them with `\n`, without a trailing
    /// separator. Empty input yields an empty string.
    pub fn read_all(&self) -> ChainResult<String> {
        let mut reader = self.as_reader()?;
        let mut joined = String::new();
        if let Some(first) = reader.next_line()? {
            joined = first;
            while let Some(line) = reader.next_line()? {
                joined.push('\n');
                joined.push_str(&line);
            }
        }
        Ok(joined)
    }

    /// Reads all lines into a vector.
    pub fn read_lines(&self) -> ChainResult<Vec<String>> {
        let mut reader = self.as_reader()?;
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Returns a lazy line sequence owning the chain.
    pub fn stream_lines(&self) -> ChainResult<Lines> {
        Ok(Lines::new(self.as_reader()?))
    }

    /// Copies the decorated bytes into `sink`, returning the byte count.
    ///
    /// The sink is neither flushed nor closed.
    pub fn copy_to<W: Write + ?Sized>(&self, sink: &mut W) -> ChainResult<u64> {
        let mut pipeline = self.open_pipeline()?;
        Ok(io::copy(&mut pipeline, sink)?)
    }

    /// Copies the decoded text into `sink`, returning the character count.
    pub fn copy_text_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> ChainResult<u64> {
        let mut reader = CharsetReader::new(self.open_pipeline()?, self.config.charset());
        let mut buffer = vec![0u8; TEXT_CHUNK];
        let mut pending = 0;
        let mut chars = 0u64;
        loop {
            let read = reader.read(&mut buffer[pending..])?;
            if read == 0 {
                break;
            }
            let filled = pending + read;
            let valid = match std::str::from_utf8(&buffer[..filled]) {
                Ok(_) => filled,
                Err(err) => err.valid_up_to(),
            };
            let text = std::str::from_utf8(&buffer[..valid]).unwrap_or_default();
            write_text(sink, text)?;
            chars += text.chars().count() as u64;
            buffer.copy_within(valid..filled, 0);
            pending = filled - valid;
        }
        if pending > 0 {
            let tail = String::from_utf8_lossy(&buffer[..pending]);
            write_text(sink, &tail)?;
            chars += tail.chars().count() as u64;
        }
        Ok(chars)
    }

    /// Reads the decorated bytes into memory.
    pub fn read_bytes(&self) -> ChainResult<Vec<u8>> {
        let mut pipeline = self.open_pipeline()?;
        let mut bytes = Vec::new();
        pipeline.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

fn write_text<W: fmt::Write + ?Sized>(sink: &mut W, text: &str) -> ChainResult<()> {
    sink.write_str(text)
        .map_err(|fmt::Error| ChainError::Io(io::Error::other("text sink rejected write")))
}

impl<S: fmt::Debug> fmt::Debug for InputBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBuilder")
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
