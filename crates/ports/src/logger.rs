//! Structured logging boundary contract.

use serde_json::Value;
use std::fmt;

/// Log level.
///
/// Only two levels exist. Richer severity vocabularies are folded onto these
/// by [`crate::Severity::route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Info.
    Info,
    /// Error.
    Error,
}

impl Level {
    /// Wire name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Keys a formatter owns: caller data under these names never reaches the wire.
pub const RESERVED_KEYS: [&str; 4] = ["ts", "domain", "message", "level"];

/// Contextual key/value data carried by a message.
///
/// Insertion order is preserved, and re-inserting an existing key keeps its
/// original position.
pub type LogData = serde_json::Map<String, Value>;

/// A single log record, built and discarded within one log call.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub time: String,
    /// Severity.
    pub level: Level,
    /// Dotted domain of the emitting logger.
    pub domain: String,
    /// Rendered message text.
    pub text: String,
    /// Inherited data merged with call-site data.
    pub data: LogData,
}

/// Merge `overlay` on top of `base`; keys in `overlay` win.
#[must_use]
pub fn merge_data(base: &LogData, overlay: &LogData) -> LogData {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Build a [`LogData`] map from `key => value` pairs.
///
/// Keys accept anything convertible into `String`; values anything
/// convertible into `serde_json::Value`.
#[macro_export]
macro_rules! log_data {
    () => {
        $crate::LogData::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::LogData::new();
        $(
            data.insert(($key).into(), $crate::serde_json::Value::from($value));
        )+
        data
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_wire_names() {
        assert_eq!(Level::Info.as_str(), "info");
        assert_eq!(Level::Error.to_string(), "error");
    }

    #[test]
    fn merge_prefers_overlay_and_keeps_position() {
        let base = crate::log_data! { "a" => 1, "b" => "x" };
        let overlay = crate::log_data! { "a" => 2, "c" => true };

        let merged = merge_data(&base, &overlay);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(merged.get("a"), Some(&Value::from(2)));
        assert_eq!(base.get("a"), Some(&Value::from(1)));
    }

    #[test]
    fn empty_macro_builds_empty_map() {
        let data: LogData = crate::log_data!();
        assert!(data.is_empty());
    }
}
