//! # domainlog-config
//!
//! Logger configuration: schema, validation, and environment overrides.
//! This crate depends on `ports` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (defaults + env).
pub mod load;
/// Configuration schema types and validation.
pub mod schema;

pub use env::{
    ENV_DATA, ENV_DOMAIN, ENV_FORMAT, ENV_SINK, EnvParseError, LoggerEnv, apply_env_overrides,
};
pub use load::{load_logger_config, load_logger_config_std_env, to_pretty_json};
pub use schema::{
    ConfigSchemaError, DEFAULT_DOMAIN, FormatKind, LoggerConfig, SinkKind, ValidatedLoggerConfig,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
