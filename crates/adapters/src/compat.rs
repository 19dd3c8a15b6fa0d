//! Conventional severity-leveled interface over a [`LevelLogger`].

use crate::logger::Logger;
use domainlog_ports::{LevelLogger, MessageBlock, Route, Severity, StandardLogger};
use domainlog_shared::Result;

/// Presents a two-level logger as a [`StandardLogger`].
///
/// | Severity | Forwarded to |
/// |---|---|
/// | `Error`, `Warn`, `Unknown` | [`LevelLogger::log_error`] |
/// | `Fatal` | [`LevelLogger::log_fatal`] |
/// | `Info` | [`LevelLogger::log_info`] |
/// | `Debug` | nothing |
///
/// Message text is forwarded literally; `%` has no special meaning here.
#[derive(Debug, Clone)]
pub struct CompatibilityAdapter<L = Logger> {
    inner: L,
}

impl<L: LevelLogger> CompatibilityAdapter<L> {
    /// Wrap `inner`.
    pub const fn new(inner: L) -> Self {
        Self { inner }
    }

    /// The wrapped logger.
    pub const fn inner(&self) -> &L {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: LevelLogger> StandardLogger for CompatibilityAdapter<L> {
    fn add(
        &self,
        severity: Severity,
        message: Option<&str>,
        progname: Option<&str>,
        block: Option<MessageBlock<'_>>,
    ) -> Result<()> {
        // Unrouted severities are dropped before the block is run.
        let Some(route) = severity.route() else {
            return Ok(());
        };

        let text = match (message, block) {
            (Some(message), _) => message.to_string(),
            (None, Some(block)) => block(),
            (None, None) => progname.unwrap_or_default().to_string(),
        };

        match route {
            Route::Info => self.inner.log_info(&text),
            Route::Error => self.inner.log_error(&text),
            Route::Fatal => self.inner.log_fatal(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domainlog_testkit::in_memory::{FATAL_REACHED, RecordingLevelLogger};
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn adapter() -> CompatibilityAdapter<RecordingLevelLogger> {
        CompatibilityAdapter::new(RecordingLevelLogger::default())
    }

    fn text(value: &str) -> String {
        value.to_string()
    }

    #[test]
    fn severities_follow_route_table() -> Result<()> {
        let adapter = adapter();

        adapter.add(Severity::Error, Some("e"), None, None)?;
        adapter.add(Severity::Warn, Some("w"), None, None)?;
        adapter.add(Severity::Unknown, Some("u"), None, None)?;
        adapter.add(Severity::Info, Some("i"), None, None)?;
        adapter.add(Severity::Debug, Some("d"), None, None)?;

        assert_eq!(
            adapter.inner().calls(),
            vec![
                (Route::Error, text("e")),
                (Route::Error, text("w")),
                (Route::Error, text("u")),
                (Route::Info, text("i")),
            ]
        );
        Ok(())
    }

    #[test]
    fn message_resolution_prefers_message_then_block_then_progname() -> Result<()> {
        let adapter = adapter();
        let block = || "from block".to_string();

        adapter.add(Severity::Info, Some("explicit"), Some("prog"), Some(&block))?;
        adapter.add(Severity::Info, None, Some("prog"), Some(&block))?;
        adapter.add(Severity::Info, None, Some("prog"), None)?;
        adapter.add(Severity::Info, None, None, None)?;

        assert_eq!(
            adapter.inner().calls(),
            vec![
                (Route::Info, text("explicit")),
                (Route::Info, text("from block")),
                (Route::Info, text("prog")),
                (Route::Info, text("")),
            ]
        );
        Ok(())
    }

    #[test]
    fn entry_points_route_through_add() -> Result<()> {
        let adapter = adapter();

        adapter.info("starting")?;
        adapter.error("failed")?;
        adapter.warn("slow")?;
        adapter.unknown("odd")?;
        adapter.append("appended")?;
        adapter.log(Severity::Warn, Some("logged"), None)?;
        adapter.debug("hidden")?;

        assert_eq!(
            adapter.inner().calls(),
            vec![
                (Route::Info, text("starting")),
                (Route::Error, text("failed")),
                (Route::Error, text("slow")),
                (Route::Error, text("odd")),
                (Route::Info, text("appended")),
                (Route::Error, text("logged")),
            ]
        );
        Ok(())
    }

    #[test]
    fn debug_blocks_are_never_evaluated() -> Result<()> {
        let adapter = adapter();
        let evaluated = Cell::new(false);
        let block = || {
            evaluated.set(true);
            "expensive".to_string()
        };

        adapter.debug_with(&block)?;
        adapter.add(Severity::Debug, None, None, Some(&block))?;

        assert!(!evaluated.get());
        assert!(adapter.inner().calls().is_empty());
        Ok(())
    }

    #[test]
    fn block_entry_points_evaluate_lazily() -> Result<()> {
        let adapter = adapter();

        adapter.info_with(&|| "lazy info".to_string())?;
        adapter.warn_with(&|| "lazy warn".to_string())?;
        adapter.error_with(&|| "lazy error".to_string())?;
        adapter.unknown_with(&|| "lazy unknown".to_string())?;

        assert_eq!(
            adapter.inner().calls(),
            vec![
                (Route::Info, text("lazy info")),
                (Route::Error, text("lazy warn")),
                (Route::Error, text("lazy error")),
                (Route::Error, text("lazy unknown")),
            ]
        );
        Ok(())
    }

    #[test]
    fn fatal_routes_to_log_fatal() {
        let adapter = adapter();

        let outcome = catch_unwind(AssertUnwindSafe(|| adapter.fatal("going down")));

        let payload = outcome.err().and_then(|payload| {
            payload
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| payload.downcast_ref::<&str>().map(|text| (*text).to_string()))
        });
        assert_eq!(payload.as_deref(), Some(FATAL_REACHED));
        assert_eq!(adapter.inner().calls(), vec![(Route::Fatal, text("going down"))]);
    }

    #[test]
    fn queries_and_mutators_are_inert() -> Result<()> {
        let adapter = adapter();

        assert!(!adapter.is_debug_enabled());
        assert!(adapter.is_info_enabled());
        assert!(adapter.is_warn_enabled());
        assert!(adapter.is_error_enabled());
        assert!(adapter.is_fatal_enabled());

        adapter.set_level(Severity::Fatal);
        adapter.set_sev_threshold(Severity::Unknown);
        adapter.set_datetime_format(Some("%H"));
        adapter.close();
        assert_eq!(adapter.datetime_format(), None);

        adapter.reopen().info("still logging")?;
        assert_eq!(adapter.inner().calls(), vec![(Route::Info, text("still logging"))]);
        Ok(())
    }

    #[test]
    fn text_is_forwarded_literally() -> Result<()> {
        let adapter = adapter();
        adapter.error("disk at 100%d")?;
        assert_eq!(adapter.inner().calls(), vec![(Route::Error, text("disk at 100%d"))]);
        Ok(())
    }
}
