//! Logger configuration schema and validation.

use domainlog_ports::{LogData, RESERVED_KEYS};
use domainlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain used when none is configured.
pub const DEFAULT_DOMAIN: &str = "app";

/// Formatter selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable `ts level domain: text k=v` lines.
    Text,
}

impl FormatKind {
    /// Config/env spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }

    /// Parse a case-insensitive, trimmed name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Output stream selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

impl SinkKind {
    /// Config/env spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stderr => "stderr",
            Self::Stdout => "stdout",
        }
    }

    /// Parse a case-insensitive, trimmed name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "stderr" => Some(Self::Stderr),
            "stdout" => Some(Self::Stdout),
            _ => None,
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Root logger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Dotted domain of the root logger.
    pub domain: String,
    /// Formatter.
    pub format: FormatKind,
    /// Output stream.
    pub sink: SinkKind,
    /// Default data attached to every message.
    pub data: LogData,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            format: FormatKind::default(),
            sink: SinkKind::default(),
            data: LogData::new(),
        }
    }
}

impl LoggerConfig {
    /// Validate and normalize (the domain is trimmed).
    pub fn validate(mut self) -> Result<ValidatedLoggerConfig, ConfigSchemaError> {
        self.domain = self.domain.trim().to_string();
        validate_domain(&self.domain)?;

        if let Some(key) = self
            .data
            .keys()
            .find(|key| RESERVED_KEYS.contains(&key.as_str()))
        {
            return Err(ConfigSchemaError::ReservedDataKey { key: key.clone() });
        }

        Ok(ValidatedLoggerConfig { raw: self })
    }
}

fn validate_domain(domain: &str) -> Result<(), ConfigSchemaError> {
    if domain.is_empty() {
        return Err(ConfigSchemaError::EmptyDomain);
    }
    let malformed = domain
        .split('.')
        .any(|segment| segment.is_empty() || segment.chars().any(char::is_whitespace));
    if malformed {
        return Err(ConfigSchemaError::InvalidDomain {
            domain: domain.to_string(),
        });
    }
    Ok(())
}

/// A [`LoggerConfig`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLoggerConfig {
    raw: LoggerConfig,
}

impl ValidatedLoggerConfig {
    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggerConfig {
        self.raw
    }
}

impl AsRef<LoggerConfig> for ValidatedLoggerConfig {
    fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggerConfig {
    type Target = LoggerConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Config validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The domain is empty after trimming.
    EmptyDomain,
    /// The domain has an empty or whitespace-bearing segment.
    InvalidDomain {
        /// Offending domain.
        domain: String,
    },
    /// Default data uses a key the formatter reserves.
    ReservedDataKey {
        /// Offending key.
        key: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyDomain | Self::InvalidDomain { .. } => {
                ErrorCode::new("config", "invalid_domain")
            },
            Self::ReservedDataKey { .. } => ErrorCode::new("config", "reserved_data_key"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain => formatter.write_str("domain must be non-empty"),
            Self::InvalidDomain { domain } => {
                write!(formatter, "domain has an empty or blank segment: {domain:?}")
            },
            Self::ReservedDataKey { key } => {
                write!(formatter, "data key {key:?} is reserved by the formatter")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::EmptyDomain => envelope,
            ConfigSchemaError::InvalidDomain { domain } => envelope.with_metadata("domain", domain),
            ConfigSchemaError::ReservedDataKey { key } => envelope.with_metadata("key", key),
        }
    }
}
