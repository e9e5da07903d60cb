//! Buffered, charset-decoding text reader.

use std::io::{self, BufRead, BufReader, Read};

use memchr::memchr2;

use crate::charset::{Charset, CharsetReader};
use crate::pipeline::Pipeline;

/// Line-oriented reader over a decoded pipeline.
///
/// Bytes produced through [`Read`] and [`BufRead`] are UTF-8 regardless of
/// the source charset. [`TextReader::next_line`] recognises `\n`, `\r\n` and
/// a lone `\r` as terminators; the std [`BufRead::lines`] adapter only splits
/// on `\n`.
#[derive(Debug)]
pub struct TextReader {
    inner: BufReader<CharsetReader<Pipeline>>,
    skip_lf: bool,
}

impl TextReader {
    pub(crate) fn new(pipeline: Pipeline, charset: Charset) -> Self {
        Self {
            inner: BufReader::new(CharsetReader::new(pipeline, charset)),
            skip_lf: false,
        }
    }

    /// Returns the charset the pipeline is decoded with.
    #[must_use]
    pub fn charset(&self) -> Charset {
        self.inner.get_ref().charset()
    }

    /// Returns the label of the underlying source.
    #[must_use]
    pub fn label(&self) -> &str {
        self.inner.get_ref().get_ref().label()
    }

    /// Reads the next line without its terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted. A final line without
    /// a terminator is still returned.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        let mut partial = false;
        loop {
            let available = self.inner.fill_buf()?;
            if available.is_empty() {
                return if partial {
                    into_string(line).map(Some)
                } else {
                    Ok(None)
                };
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.inner.consume(1);
                    continue;
                }
            }

            if let Some(index) = memchr2(b'\n', b'\r', available) {
                line.extend_from_slice(&available[..index]);
                self.skip_lf = available[index] == b'\r';
                self.inner.consume(index + 1);
                return into_string(line).map(Some);
            }

            let consumed = available.len();
            line.extend_from_slice(available);
            self.inner.consume(consumed);
            partial = true;
        }
    }

    /// Drops a `\n` left over from a `\r\n` pair split by [`Self::next_line`].
    fn discard_pending_lf(&mut self) -> io::Result<()> {
        if self.skip_lf {
            self.skip_lf = false;
            if self.inner.fill_buf()?.first() == Some(&b'\n') {
                self.inner.consume(1);
            }
        }
        Ok(())
    }
}

fn into_string(line: Vec<u8>) -> io::Result<String> {
    String::from_utf8(line).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

impl Read for TextReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.discard_pending_lf()?;
        self.inner.read(buf)
    }
}

impl BufRead for TextReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.discard_pending_lf()?;
        self.inner.fill_buf()
    }

    fn consume(&mut self, amount: usize) {
        self.inner.consume(amount);
    }
}
