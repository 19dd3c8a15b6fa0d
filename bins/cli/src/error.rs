use domainlog_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    InvalidInput = 2,
    Io = 3,
    Internal = 1,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug)]
pub enum CliError {
    InvalidInput(String),
    Log(ErrorEnvelope),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::Log(envelope) => envelope_exit_code(envelope),
            Self::Io(_) => ExitCode::Io,
            Self::Serialization(_) => ExitCode::Internal,
        }
    }
}

fn envelope_exit_code(envelope: &ErrorEnvelope) -> ExitCode {
    if envelope.code.namespace() == "config" || envelope.code == ErrorCode::invalid_format() {
        ExitCode::InvalidInput
    } else if envelope.code == ErrorCode::sink_write() || envelope.code == ErrorCode::io() {
        ExitCode::Io
    } else {
        ExitCode::Internal
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(formatter, "invalid input: {message}"),
            Self::Log(envelope) => write!(formatter, "{envelope}"),
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Serialization(error) => write!(formatter, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ErrorEnvelope> for CliError {
    fn from(error: ErrorEnvelope) -> Self {
        Self::Log(error)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_codes_map_to_exit_codes() {
        let cases = [
            (ErrorCode::invalid_format(), ExitCode::InvalidInput),
            (ErrorCode::new("config", "invalid_env_enum"), ExitCode::InvalidInput),
            (ErrorCode::sink_write(), ExitCode::Io),
            (ErrorCode::format_failed(), ExitCode::Internal),
        ];
        for (code, expected) in cases {
            let error = CliError::from(ErrorEnvelope::expected(code, "x"));
            assert_eq!(error.exit_code(), expected);
        }
    }
}
