#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises the diagnostics vocabulary shared by the stream
//! chain crates. Library code emits [`tracing`] events through the macros in
//! this crate so every event lands under a stable target, and applications
//! decide whether and how to subscribe.
//!
//! # Targets
//!
//! | Target | Emitted by |
//! |--------|------------|
//! | [`targets::REGISTRY`] | extension registration and peeling |
//! | [`targets::CHAIN`] | pipeline assembly and terminal consumers |
//! | [`targets::SOURCE`] | opening sources |
//!
//! # Configuration
//!
//! [`LogConfig::from_env`] reads the filter directive from the
//! `STREAMCHAIN_LOG` environment variable. With the `subscriber` feature enabled
//! `init_tracing` installs a `tracing-subscriber` formatter using that
//! filter. Library crates never install a subscriber on their own.
//!
//! # Examples
//!
//! ```
//! use logging::LogConfig;
//!
//! let config = LogConfig::from_value(Some("streamchain::registry=trace".as_ref())).unwrap();
//! assert_eq!(config.filter(), "streamchain::registry=trace");
//! ```

mod config;
#[cfg(feature = "subscriber")]
mod init;
pub mod targets;
mod tracing_macros;

pub use config::{LOG_ENV, LogConfig, LogConfigError};
#[cfg(feature = "subscriber")]
pub use init::{InitError, init_tracing};
