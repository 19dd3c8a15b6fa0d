//! Formatter boundary contract.

use crate::Message;
use domainlog_shared::Result;

/// Turns a [`Message`] into the exact text handed to a sink.
///
/// Formatters own the wire representation. They should be pure: the same
/// message always yields the same line.
///
/// Any `Fn(&Message) -> Result<String>` closure is a formatter.
pub trait Formatter: Send + Sync {
    /// Render a message.
    fn format(&self, message: &Message) -> Result<String>;
}

impl<F> Formatter for F
where
    F: Fn(&Message) -> Result<String> + Send + Sync,
{
    fn format(&self, message: &Message) -> Result<String> {
        self(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, LogData};

    #[test]
    fn closures_are_formatters() -> Result<()> {
        let formatter =
            |message: &Message| -> Result<String> { Ok(format!("{} {}", message.level, message.text)) };
        let message = Message {
            time: "2020-01-01T00:00:00Z".to_string(),
            level: Level::Info,
            domain: "app".to_string(),
            text: "hello".to_string(),
            data: LogData::new(),
        };

        let boxed: &dyn Formatter = &formatter;
        assert_eq!(boxed.format(&message)?, "info hello");
        Ok(())
    }
}
