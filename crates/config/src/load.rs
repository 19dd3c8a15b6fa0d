//! Config loading helpers (defaults + env).
//!
//! Precedence (highest wins):
//! - env overrides (`LoggerEnv`)
//! - defaults (`LoggerConfig::default()`)

use crate::{LoggerConfig, LoggerEnv, ValidatedLoggerConfig, apply_env_overrides};
use domainlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Load the logger config from defaults and the provided env overrides.
pub fn load_logger_config(env: &LoggerEnv) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    apply_env_overrides(LoggerConfig::default(), env)
}

/// Load the logger config from defaults and the process environment.
pub fn load_logger_config_std_env() -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let env = LoggerEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_logger_config(&env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LoggerConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}
