//! Streams of framed objects.
//!
//! Objects are consecutive JSON values, optionally separated by whitespace,
//! read straight from the byte pipeline. The payload must therefore be UTF-8;
//! the configured charset only applies to text terminals.

use std::fmt;
use std::io::BufReader;

use serde::de::DeserializeOwned;
use serde_json::StreamDeserializer;
use serde_json::de::IoRead;

use crate::error::ChainResult;
use crate::pipeline::Pipeline;

/// Iterator deserializing successive objects of type `T`.
///
/// Iteration ends at end of input or after the first error.
pub struct ObjectStream<T> {
    inner: StreamDeserializer<'static, IoRead<BufReader<Pipeline>>, T>,
    failed: bool,
}

impl<T: DeserializeOwned> ObjectStream<T> {
    pub(crate) fn new(pipeline: Pipeline) -> Self {
        Self {
            inner: serde_json::Deserializer::from_reader(BufReader::new(pipeline)).into_iter(),
            failed: false,
        }
    }

    /// Returns the number of bytes consumed by successfully parsed objects.
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.inner.byte_offset()
    }
}

impl<T: DeserializeOwned> Iterator for ObjectStream<T> {
    type Item = ChainResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.inner.next()? {
            Ok(value) => Some(Ok(value)),
            Err(err) => {
                self.failed = true;
                Some(Err(err.into()))
            }
        }
    }
}

impl<T> fmt::Debug for ObjectStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStream")
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
