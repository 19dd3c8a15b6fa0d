//! UTC timestamps for log messages.

use chrono::{DateTime, Utc};

/// `strftime` pattern of message timestamps: second precision, `Z` suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current instant rendered with [`TIMESTAMP_FORMAT`].
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze at `at`.
    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Freeze at a Unix timestamp (seconds). `None` when out of range.
    #[must_use]
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render `at` as `YYYY-MM-DDTHH:MM:SSZ`.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_formats_without_fraction() {
        let clock = FixedClock::from_unix_seconds(1_577_934_245);
        let stamp = clock.map(|clock| clock.timestamp());
        assert_eq!(stamp.as_deref(), Some("2020-01-02T03:04:05Z"));
    }

    #[test]
    fn fractional_seconds_are_dropped() {
        let at = DateTime::from_timestamp(1_577_934_245, 999_000_000);
        assert_eq!(
            at.map(format_timestamp).as_deref(),
            Some("2020-01-02T03:04:05Z")
        );
    }

    #[test]
    fn system_clock_matches_shape() {
        let stamp = SystemClock.timestamp();
        assert_eq!(stamp.len(), 20);
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.as_bytes().get(10), Some(&b'T'));
    }
}
