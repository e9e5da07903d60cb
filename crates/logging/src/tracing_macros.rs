//! Convenience macros for stream chain tracing.
//!
//! These macros wrap the standard tracing macros with the workspace targets.
//! Callers must depend on `tracing` directly.

/// Emit a registry trace at debug level.
///
/// # Example
/// ```ignore
/// trace_registry!(extension = "gz", "registered input wrapper");
/// ```
#[macro_export]
macro_rules! trace_registry {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "streamchain::registry", $($arg)*);
    };
}

/// Emit a per-layer registry trace at trace level.
///
/// # Example
/// ```ignore
/// trace_peel!(segment = "tar", "applied input wrapper");
/// ```
#[macro_export]
macro_rules! trace_peel {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "streamchain::registry", $($arg)*);
    };
}

/// Emit a chain assembly trace at debug level.
///
/// # Example
/// ```ignore
/// trace_chain!(decompress = true, "assembling pipeline");
/// ```
#[macro_export]
macro_rules! trace_chain {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "streamchain::chain", $($arg)*);
    };
}

/// Emit a source trace at trace level.
///
/// # Example
/// ```ignore
/// trace_source!(name = "data.gz", "opened source");
/// ```
#[macro_export]
macro_rules! trace_source {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "streamchain::source", $($arg)*);
    };
}

/// Emit a chain warning, used when a configured value is ignored.
///
/// # Example
/// ```ignore
/// warn_chain!("ignoring invalid charset label {label}");
/// ```
#[macro_export]
macro_rules! warn_chain {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "streamchain::chain", $($arg)*);
    };
}
