//! Subscriber installation for applications embedding the chain crates.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

use crate::config::LogConfig;

/// Errors produced while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        /// The rejected directive.
        filter: String,
        /// Parser diagnostic.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Installs a formatting subscriber filtered by `config`.
///
/// # Example
/// ```ignore
/// let config = logging::LogConfig::from_env()?;
/// logging::init_tracing(&config)?;
/// ```
pub fn init_tracing(config: &LogConfig) -> Result<(), InitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_new(config.filter()).map_err(|source| InitError::Filter {
        filter: config.filter().to_owned(),
        source,
    })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
