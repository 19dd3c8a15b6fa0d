//! Build a [`Logger`] from validated configuration.

use crate::formatter::{JsonFormatter, TextFormatter};
use crate::log_sink::{StderrLogSink, StdoutLogSink};
use crate::logger::Logger;
use domainlog_config::{FormatKind, SinkKind, ValidatedLoggerConfig};
use domainlog_ports::{Formatter, LogSink};
use std::sync::Arc;

/// Formatter for a configured kind.
#[must_use]
pub fn formatter_for(kind: FormatKind) -> Arc<dyn Formatter> {
    match kind {
        FormatKind::Json => Arc::new(JsonFormatter),
        FormatKind::Text => Arc::new(TextFormatter),
    }
}

/// Sink for a configured kind.
#[must_use]
pub fn sink_for(kind: SinkKind) -> Arc<dyn LogSink> {
    match kind {
        SinkKind::Stderr => Arc::new(StderrLogSink),
        SinkKind::Stdout => Arc::new(StdoutLogSink),
    }
}

/// Root logger described by `config`.
#[must_use]
pub fn logger_from_config(config: &ValidatedLoggerConfig) -> Logger {
    tracing::debug!(
        domain = %config.domain,
        format = %config.format,
        sink = %config.sink,
        "building logger from config"
    );
    Logger::builder(config.domain.clone())
        .formatter(formatter_for(config.format))
        .sink(sink_for(config.sink))
        .data(config.data.clone())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domainlog_config::LoggerConfig;
    use domainlog_ports::{Level, Message, log_data};

    #[test]
    fn logger_takes_domain_and_data() -> Result<(), Box<dyn std::error::Error>> {
        let config = LoggerConfig {
            domain: "billing".to_string(),
            data: log_data! { "region" => "eu" },
            ..LoggerConfig::default()
        }
        .validate()?;

        let logger = logger_from_config(&config);

        assert_eq!(logger.domain(), "billing");
        assert_eq!(logger.default_data(), &log_data! { "region" => "eu" });
        Ok(())
    }

    #[test]
    fn formatter_kinds_select_wire_format() -> Result<(), Box<dyn std::error::Error>> {
        let message = Message {
            time: "2020-01-02T03:04:05Z".to_string(),
            level: Level::Info,
            domain: "app".to_string(),
            text: "hi".to_string(),
            data: log_data!(),
        };

        let json = formatter_for(FormatKind::Json).format(&message)?;
        let text = formatter_for(FormatKind::Text).format(&message)?;

        assert!(json.starts_with('{'));
        assert_eq!(text, "2020-01-02T03:04:05Z info app: hi\n");
        Ok(())
    }
}
