//! # domainlog-testkit
//!
//! Test doubles and record helpers.
//! This crate depends on `ports` and `shared`.

pub mod in_memory;
pub mod records;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
