//! Filter configuration sourced from the environment.

use std::env;
use std::ffi::OsStr;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "STREAMCHAIN_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Errors produced while interpreting [`LOG_ENV`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LogConfigError {
    /// The variable is set but contains only whitespace.
    #[error("STREAMCHAIN_LOG is set but empty")]
    Empty,
    /// The variable does not hold valid UTF-8.
    #[error("STREAMCHAIN_LOG accepts only UTF-8 values")]
    NotUnicode,
}

/// Filter directive applied by the subscriber.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_owned(),
        }
    }
}

impl LogConfig {
    /// Creates a configuration with an explicit filter directive.
    #[must_use]
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    /// Reads [`LOG_ENV`]. An unset variable yields the default `warn` filter.
    pub fn from_env() -> Result<Self, LogConfigError> {
        Self::from_value(env::var_os(LOG_ENV).as_deref())
    }

    /// Interprets a raw variable value as [`from_env`](Self::from_env) would.
    pub fn from_value(value: Option<&OsStr>) -> Result<Self, LogConfigError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };
        let text = value.to_str().ok_or(LogConfigError::NotUnicode)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LogConfigError::Empty);
        }
        Ok(Self::new(trimmed))
    }

    /// Returns the filter directive.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }
}
