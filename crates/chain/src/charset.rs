//! Charset selection and a streaming decoder producing UTF-8.
//!
//! Charsets are resolved through the WHATWG label table of [`encoding_rs`],
//! so `latin1`, `ISO-8859-1` and `windows-1252` all name the same decoder.
//! [`CharsetReader`] turns any byte input into UTF-8, replacing malformed
//! sequences with U+FFFD.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Read};

use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use logging::warn_chain;

use crate::error::{ChainError, ChainResult};

/// Environment variable overriding the platform default charset.
pub const CHARSET_ENV: &str = "STREAMCHAIN_CHARSET";

/// Locale variables consulted, in order, for the platform codeset.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

const BUFFER_SIZE: usize = 8 * 1024;

/// A character encoding used to decode text terminals.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Charset(&'static Encoding);

impl Charset {
    /// Resolves a charset label such as `utf-8` or `ISO-8859-1`.
    pub fn for_label(label: &str) -> ChainResult<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| ChainError::UnsupportedCharset(label.to_owned()))
    }

    /// Returns UTF-8.
    #[must_use]
    pub const fn utf8() -> Self {
        Self(UTF_8)
    }

    /// Wraps an `encoding_rs` encoding.
    #[must_use]
    pub const fn from_encoding(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }

    /// Returns the underlying encoding.
    #[must_use]
    pub const fn encoding(self) -> &'static Encoding {
        self.0
    }

    /// Returns the canonical name of the charset.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Reads the charset named by `STREAMCHAIN_CHARSET`.
    ///
    /// Returns `Ok(None)` when the variable is unset or empty.
    pub fn from_env() -> ChainResult<Option<Self>> {
        Self::from_env_value(env::var_os(CHARSET_ENV).as_deref())
    }

    /// Parses a raw `STREAMCHAIN_CHARSET` value.
    pub fn from_env_value(value: Option<&OsStr>) -> ChainResult<Option<Self>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let text = value
            .to_str()
            .ok_or_else(|| ChainError::UnsupportedCharset(value.to_string_lossy().into_owned()))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Self::for_label(text).map(Some)
    }

    /// Returns the charset used when a builder is not told otherwise.
    ///
    /// `STREAMCHAIN_CHARSET` wins when it names a known charset. Otherwise the
    /// codeset of the first non-empty locale variable is used, falling back
    /// to UTF-8.
    #[must_use]
    pub fn platform_default() -> Self {
        match Self::from_env() {
            Ok(Some(charset)) => return charset,
            Ok(None) => {}
            Err(err) => warn_chain!("ignoring {}: {}", CHARSET_ENV, err),
        }
        Self::from_locale(|name| env::var_os(name)).unwrap_or_else(Self::utf8)
    }

    /// Resolves the codeset of the active locale using `lookup` to read
    /// environment variables.
    pub fn from_locale<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let locale = LOCALE_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.is_empty())?;
        let codeset = locale_codeset(locale.to_str()?)?;
        Encoding::for_label(codeset.as_bytes()).map(Self)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extracts the codeset from a POSIX locale name such as
/// `en_US.ISO-8859-1@euro`.
fn locale_codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split_once('@').map_or(rest, |(codeset, _)| codeset);
    (!codeset.is_empty()).then_some(codeset)
}

/// Streaming decoder from a charset to UTF-8.
///
/// A leading BOM matching the configured charset is removed. Malformed input
/// is replaced with U+FFFD rather than reported.
pub struct CharsetReader<R> {
    inner: R,
    charset: Charset,
    decoder: Decoder,
    input: Box<[u8]>,
    input_start: usize,
    input_end: usize,
    output: Box<[u8]>,
    output_start: usize,
    output_end: usize,
    eof: bool,
    finished: bool,
}

impl<R: Read> CharsetReader<R> {
    /// Wraps `inner`, decoding it with `charset`.
    pub fn new(inner: R, charset: Charset) -> Self {
        Self {
            inner,
            charset,
            decoder: charset.encoding().new_decoder_with_bom_removal(),
            input: vec![0; BUFFER_SIZE].into_boxed_slice(),
            input_start: 0,
            input_end: 0,
            output: vec![0; BUFFER_SIZE].into_boxed_slice(),
            output_start: 0,
            output_end: 0,
            eof: false,
            finished: false,
        }
    }

    /// Returns the charset being decoded.
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// Returns a reference to the wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Decodes the next chunk into the output buffer.
    fn refill(&mut self) -> io::Result<()> {
        while self.output_start == self.output_end && !self.finished {
            if self.input_start == self.input_end && !self.eof {
                let read = self.inner.read(&mut self.input)?;
                self.input_start = 0;
                self.input_end = read;
                self.eof = read == 0;
            }

            let (result, read, written, _) = self.decoder.decode_to_utf8(
                &self.input[self.input_start..self.input_end],
                &mut self.output,
                self.eof,
            );
            self.input_start += read;
            self.output_start = 0;
            self.output_end = written;

            if self.eof && result == CoderResult::InputEmpty {
                self.finished = true;
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for CharsetReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.refill()?;
        let pending = &self.output[self.output_start..self.output_end];
        let count = pending.len().min(buf.len());
        buf[..count].copy_from_slice(&pending[..count]);
        self.output_start += count;
        Ok(count)
    }
}

impl<R> fmt::Debug for CharsetReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharsetReader")
            .field("charset", &self.charset)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
