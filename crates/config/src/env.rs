//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is present but empty or malformed
//! fails instead of being ignored.

use crate::schema::{FormatKind, LoggerConfig, SinkKind, ValidatedLoggerConfig};
use domainlog_ports::{LogData, merge_data};
use domainlog_shared::{ErrorCode, ErrorEnvelope};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Env var: root logger domain.
pub const ENV_DOMAIN: &str = "DOMAINLOG_DOMAIN";
/// Env var: formatter (`json` | `text`).
pub const ENV_FORMAT: &str = "DOMAINLOG_FORMAT";
/// Env var: output stream (`stderr` | `stdout`).
pub const ENV_SINK: &str = "DOMAINLOG_SINK";
/// Env var: default data as a JSON object.
pub const ENV_DATA: &str = "DOMAINLOG_DATA";

const ALL_VARS: [&str; 4] = [ENV_DOMAIN, ENV_FORMAT, ENV_SINK, ENV_DATA];

/// Logger overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggerEnv {
    /// Domain override.
    pub domain: Option<String>,
    /// Formatter override.
    pub format: Option<FormatKind>,
    /// Sink override.
    pub sink: Option<SinkKind>,
    /// Data merged over the configured default data.
    pub data: Option<LogData>,
}

impl LoggerEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            domain: parse_optional_trimmed_string(map, ENV_DOMAIN)?,
            format: parse_optional_enum(map, ENV_FORMAT, FormatKind::parse)?,
            sink: parse_optional_enum(map, ENV_SINK, SinkKind::parse)?,
            data: parse_optional_object(map, ENV_DATA)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// Whether no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.domain.is_none() && self.format.is_none() && self.sink.is_none() && self.data.is_none()
    }
}

/// Apply env overrides to a base config (env wins) and validate the result.
///
/// Env data is merged over the base data key by key rather than replacing it.
pub fn apply_env_overrides(
    base: LoggerConfig,
    env: &LoggerEnv,
) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(domain) = &env.domain {
        tracing::debug!(var = ENV_DOMAIN, %domain, "domain overridden from env");
        config.domain.clone_from(domain);
    }
    if let Some(format) = env.format {
        tracing::debug!(var = ENV_FORMAT, %format, "format overridden from env");
        config.format = format;
    }
    if let Some(sink) = env.sink {
        tracing::debug!(var = ENV_SINK, %sink, "sink overridden from env");
        config.sink = sink;
    }
    if let Some(data) = &env.data {
        tracing::debug!(var = ENV_DATA, keys = data.len(), "data merged from env");
        config.data = merge_data(&config.data, data);
    }

    config.validate().map_err(Into::into)
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// JSON env var did not parse.
    InvalidJson {
        /// Env var name.
        var: &'static str,
        /// Parser message.
        message: String,
    },
    /// JSON env var parsed but is not an object.
    NotAnObject {
        /// Env var name.
        var: &'static str,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::InvalidJson { .. } | Self::NotAnObject { .. } => {
                ErrorCode::new("config", "invalid_env_json")
            },
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
            Self::InvalidJson { var, message } => {
                write!(formatter, "{var} must be valid JSON: {message}")
            },
            Self::NotAnObject { var } => write!(formatter, "{var} must be a JSON object"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var }
            | EnvParseError::InvalidJson { var, .. }
            | EnvParseError::NotAnObject { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned()))
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    parse(&raw)
        .map(Some)
        .ok_or(EnvParseError::InvalidEnum { var, value: raw })
}

fn parse_optional_object(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<LogData>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    let value: Value = serde_json::from_str(&raw).map_err(|error| EnvParseError::InvalidJson {
        var,
        message: error.to_string(),
    })?;
    match value {
        Value::Object(object) => Ok(Some(object)),
        _ => Err(EnvParseError::NotAnObject { var }),
    }
}
