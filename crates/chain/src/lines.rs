//! Lazy, closable line sequence.

use logging::trace_chain;

use crate::error::{ChainError, ChainResult};
use crate::text::TextReader;

#[derive(Debug)]
enum State {
    Open(TextReader),
    Exhausted,
    Closed,
}

/// Iterator over the lines of a chain that owns its reader.
///
/// The reader is released exactly once: when the input is exhausted, when a
/// read fails, on [`Lines::close`], or on drop. The sequence never restarts.
/// After an explicit close every call to `next` yields
/// [`ChainError::LinesClosed`], so loops should stop on the first error.
#[derive(Debug)]
pub struct Lines {
    state: State,
}

impl Lines {
    pub(crate) const fn new(reader: TextReader) -> Self {
        Self {
            state: State::Open(reader),
        }
    }

    /// Releases the underlying reader. Calling it again has no effect.
    pub fn close(&mut self) {
        if let State::Open(reader) = std::mem::replace(&mut self.state, State::Closed) {
            trace_chain!(source = reader.label(), "line sequence closed early");
        }
    }

    /// Reports whether the underlying reader is still held.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }
}

impl Iterator for Lines {
    type Item = ChainResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let State::Open(reader) = &mut self.state else {
            return match self.state {
                State::Closed => Some(Err(ChainError::LinesClosed)),
                State::Open(_) | State::Exhausted => None,
            };
        };
        match reader.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.state = State::Exhausted;
                None
            }
            Err(err) => {
                self.state = State::Exhausted;
                Some(Err(err.into()))
            }
        }
    }
}
