//! Tracing targets used across the workspace.
//!
//! The macros in this crate spell the targets out literally because
//! `tracing` requires them to be constant at the callsite; these constants
//! exist for filters and tests.

/// Registration and extension peeling in the compressor registry.
pub const REGISTRY: &str = "streamchain::registry";

/// Pipeline assembly and terminal consumption.
pub const CHAIN: &str = "streamchain::chain";

/// Opening of data sources.
pub const SOURCE: &str = "streamchain::source";

/// Every target above, in emission order of a typical chain.
pub const ALL: &[&str] = &[SOURCE, REGISTRY, CHAIN];
