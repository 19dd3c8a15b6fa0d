//! # domainlog-ports
//!
//! Boundary contracts for the domainlog hexagonal architecture.
//!
//! This crate defines the values and traits that sit between callers and the
//! logging adapters: the [`Message`] record, the [`Formatter`] and
//! [`LogSink`] collaborators, and the conventional [`StandardLogger`]
//! interface. It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod formatter;
pub mod logger;
pub mod sink;
pub mod standard;

pub use formatter::*;
pub use logger::*;
pub use sink::*;
pub use standard::*;

// Re-exported for `log_data!` expansions in downstream crates.
#[doc(hidden)]
pub use serde_json;
