//! Capability traits for stream wrappers.
//!
//! A wrapper takes ownership of a byte stream and returns a new stream that
//! decorates it, typically with a decompressing reader or a compressing
//! writer. The registry stores wrappers as shared trait objects so the same
//! constructor can be reused by any number of concurrently built chains.
//!
//! Both traits are implemented for plain closures and function pointers with
//! the matching signature, which keeps registration of ad-hoc codecs terse:
//!
//! ```
//! use compress::wrapper::{BoxedReader, InputWrapper};
//! use std::io::{self, BufReader, Read};
//!
//! let buffered = |reader: BoxedReader| -> io::Result<BoxedReader> {
//!     Ok(Box::new(BufReader::new(reader)))
//! };
//!
//! let mut wrapped = buffered.wrap(Box::new(&b"payload"[..])).unwrap();
//! let mut text = String::new();
//! wrapped.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "payload");
//! ```

use std::io::{self, Read, Write};
use std::sync::Arc;

/// Owned, sendable byte input threaded through a wrapper chain.
pub type BoxedReader = Box<dyn Read + Send>;

/// Owned, sendable byte output threaded through a wrapper chain.
pub type BoxedWriter = Box<dyn Write + Send>;

/// Shared handle to an input wrapper as stored by the registry.
pub type SharedInputWrapper = Arc<dyn InputWrapper>;

/// Shared handle to an output wrapper as stored by the registry.
pub type SharedOutputWrapper = Arc<dyn OutputWrapper>;

/// Wraps a byte input with a decoding (usually decompressing) byte input.
pub trait InputWrapper: Send + Sync {
    /// Consumes `input` and returns the decorated stream.
    fn wrap(&self, input: BoxedReader) -> io::Result<BoxedReader>;
}

/// Wraps a byte output with an encoding (usually compressing) byte output.
///
/// Returned writers must finalise their encoding when dropped, since chain
/// consumers only ever see `Write`.
pub trait OutputWrapper: Send + Sync {
    /// Consumes `output` and returns the decorated sink.
    fn wrap(&self, output: BoxedWriter) -> io::Result<BoxedWriter>;
}

impl<F> InputWrapper for F
where
    F: Fn(BoxedReader) -> io::Result<BoxedReader> + Send + Sync,
{
    fn wrap(&self, input: BoxedReader) -> io::Result<BoxedReader> {
        self(input)
    }
}

impl<F> OutputWrapper for F
where
    F: Fn(BoxedWriter) -> io::Result<BoxedWriter> + Send + Sync,
{
    fn wrap(&self, output: BoxedWriter) -> io::Result<BoxedWriter> {
        self(output)
    }
}
