//! # domainlog-shared
//!
//! Shared result types and error handling for the domainlog workspace.
//!
//! Every fallible logging operation (rendering a format string, encoding a
//! message, writing to a sink) reports failure as an [`ErrorEnvelope`].
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{
    ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, UnexpectedError,
    normalize_unexpected_error,
};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(error.kind, ErrorKind::Expected);
        assert_eq!(error.class, ErrorClass::NonRetriable);
    }

    #[test]
    fn shared_crate_compiles() {
        assert!(!shared_crate_version().is_empty());
    }
}
