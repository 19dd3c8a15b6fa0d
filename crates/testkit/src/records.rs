//! Helpers for inspecting emitted JSON lines.

use domainlog_ports::RESERVED_KEYS;
use serde_json::{Map, Value};

/// Parse one emitted line. Panics when the line is not a JSON object.
pub fn parse_line(line: &str) -> Value {
    let value: Value = serde_json::from_str(line.trim_end())
        .unwrap_or_else(|error| panic!("not a JSON line ({error}): {line:?}"));
    assert!(value.is_object(), "not a JSON object: {line:?}");
    value
}

/// Parse every line with [`parse_line`].
pub fn parse_lines(lines: &[String]) -> Vec<Value> {
    lines.iter().map(|line| parse_line(line)).collect()
}

/// The caller-supplied part of a record: everything but the reserved keys.
pub fn data_of(record: &Value) -> Map<String, Value> {
    record
        .as_object()
        .map(|object| {
            object
                .iter()
                .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Assert the level, domain and message of a record.
pub fn assert_record(record: &Value, level: &str, domain: &str, message: &str) {
    assert_eq!(record["level"], level, "level of {record}");
    assert_eq!(record["domain"], domain, "domain of {record}");
    assert_eq!(record["message"], message, "message of {record}");
    let ts = record["ts"].as_str().unwrap_or_default();
    assert_eq!(ts.len(), 20, "timestamp shape of {record}");
    assert!(ts.ends_with('Z'), "timestamp zone of {record}");
}
