//! The assembled byte pipeline handed to terminal consumers.

use std::fmt;
use std::io::{self, Read};

use compress::BoxedReader;
use logging::trace_chain;

/// A fully decorated byte input.
///
/// Dropping the pipeline drops every layer down to the raw source, which
/// releases the underlying resource.
pub struct Pipeline {
    inner: BoxedReader,
    label: String,
    bytes_read: u64,
}

impl Pipeline {
    pub(crate) fn new(inner: BoxedReader, label: String) -> Self {
        Self {
            inner,
            label,
            bytes_read: 0,
        }
    }

    /// Returns the label of the source this pipeline was opened from.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of decoded bytes read so far.
    #[must_use]
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Unwraps the decorated reader, discarding the bookkeeping.
    #[must_use]
    pub fn into_inner(mut self) -> BoxedReader {
        std::mem::replace(&mut self.inner, Box::new(io::empty()))
    }
}

impl Read for Pipeline {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.bytes_read += read as u64;
        Ok(read)
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        trace_chain!(
            source = self.label.as_str(),
            bytes = self.bytes_read,
            "pipeline released"
        );
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("label", &self.label)
            .field("bytes_read", &self.bytes_read)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn counts_bytes_read() {
        let mut pipeline = Pipeline::new(Box::new(Cursor::new(b"12345".to_vec())), "n".into());
        let mut out = Vec::new();
        pipeline.read_to_end(&mut out).expect("read");
        assert_eq!(pipeline.bytes_read(), 5);
        assert_eq!(pipeline.label(), "n");
    }

    #[test]
    fn into_inner_keeps_unread_data() {
        let mut pipeline = Pipeline::new(Box::new(Cursor::new(b"abcdef".to_vec())), "n".into());
        let mut head = [0u8; 2];
        pipeline.read_exact(&mut head).expect("head");
        let mut rest = String::new();
        pipeline
            .into_inner()
            .read_to_string(&mut rest)
            .expect("rest");
        assert_eq!(rest, "cdef");
    }
}
