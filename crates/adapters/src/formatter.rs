//! Built-in message formatters.

use domainlog_ports::{Formatter, Message};
use domainlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use serde_json::Value;
use std::fmt::Write;

/// JSON formatter emitting one object per line.
///
/// The object is the message data with `ts`, `domain`, `message` and `level`
/// set afterwards, so those four keys always carry the call's values. A data
/// key that collides with one of them keeps its position in the object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, message: &Message) -> Result<String> {
        let mut payload = message.data.clone();
        payload.insert("ts".to_string(), Value::String(message.time.clone()));
        payload.insert("domain".to_string(), Value::String(message.domain.clone()));
        payload.insert("message".to_string(), Value::String(message.text.clone()));
        payload.insert(
            "level".to_string(),
            Value::String(message.level.as_str().to_string()),
        );

        let mut line = serde_json::to_string(&payload).map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::format_failed(),
                format!("failed to encode log message: {error}"),
                ErrorClass::NonRetriable,
            )
            .with_metadata("domain", message.domain.clone())
        })?;
        line.push('\n');
        Ok(line)
    }
}

/// Human-readable single-line formatter.
///
/// `2020-01-02T03:04:05Z info app.worker: started k=v n=1`
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, message: &Message) -> Result<String> {
        let mut line = format!(
            "{} {} {}: {}",
            message.time, message.level, message.domain, message.text
        );
        for (key, value) in &message.data {
            let _ = write!(line, " {key}={}", text_value(value));
        }
        line.push('\n');
        Ok(line)
    }
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) if !needs_quoting(text) => text.clone(),
        other => other.to_string(),
    }
}

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control() || matches!(ch, '"' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domainlog_ports::{Level, log_data};

    fn message(data: domainlog_ports::LogData) -> Message {
        Message {
            time: "2020-01-02T03:04:05Z".to_string(),
            level: Level::Error,
            domain: "app.worker".to_string(),
            text: "code 500".to_string(),
            data,
        }
    }

    #[test]
    fn json_line_carries_reserved_keys_after_data() -> Result<()> {
        let line = JsonFormatter.format(&message(log_data! { "k" => "v", "n" => 3 }))?;

        assert!(line.ends_with('\n'));
        assert_eq!(
            line,
            "{\"k\":\"v\",\"n\":3,\"ts\":\"2020-01-02T03:04:05Z\",\"domain\":\"app.worker\",\"message\":\"code 500\",\"level\":\"error\"}\n"
        );
        Ok(())
    }

    #[test]
    fn reserved_keys_override_caller_data() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = log_data! { "level" => "debug", "message" => "spoofed", "extra" => true };
        let line = JsonFormatter.format(&message(data))?;
        let payload: Value = serde_json::from_str(line.trim_end())?;

        assert_eq!(payload["level"], "error");
        assert_eq!(payload["message"], "code 500");
        assert_eq!(payload["extra"], true);
        Ok(())
    }

    #[test]
    fn text_line_lists_data_pairs() -> Result<()> {
        let data = log_data! { "user" => "bob", "note" => "two words", "n" => 1 };
        let line = TextFormatter.format(&message(data))?;

        assert_eq!(
            line,
            "2020-01-02T03:04:05Z error app.worker: code 500 user=bob note=\"two words\" n=1\n"
        );
        Ok(())
    }

    #[test]
    fn text_line_without_data() -> Result<()> {
        let line = TextFormatter.format(&message(log_data!()))?;
        assert_eq!(line, "2020-01-02T03:04:05Z error app.worker: code 500\n");
        Ok(())
    }
}
