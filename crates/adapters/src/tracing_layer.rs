//! Bridge from `tracing` events into a [`StandardLogger`].
//!
//! Install [`StandardLoggerLayer`] on a `tracing_subscriber` registry and
//! every `tracing` event is forwarded through the conventional interface:
//! TRACE and DEBUG are dropped, INFO is logged as info, WARN and ERROR as
//! error. The event's `message` comes first, followed by its other fields as
//! ` name=value` pairs.

use domainlog_ports::{Severity, StandardLogger};
use std::fmt::{self, Write};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// `tracing_subscriber` layer writing events to a [`StandardLogger`].
#[derive(Debug, Clone)]
pub struct StandardLoggerLayer<L> {
    logger: L,
}

impl<L: StandardLogger> StandardLoggerLayer<L> {
    /// Forward events to `logger`.
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// The receiving logger.
    pub const fn logger(&self) -> &L {
        &self.logger
    }
}

/// Severity a `tracing` level is forwarded at.
#[must_use]
pub fn severity_for(level: &Level) -> Severity {
    if *level == Level::ERROR {
        Severity::Error
    } else if *level == Level::WARN {
        Severity::Warn
    } else if *level == Level::INFO {
        Severity::Info
    } else {
        Severity::Debug
    }
}

impl<S, L> Layer<S> for StandardLoggerLayer<L>
where
    S: Subscriber,
    L: StandardLogger + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let severity = severity_for(event.metadata().level());
        if severity.route().is_none() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let text = visitor.finish();

        if let Err(error) = self.logger.add(severity, Some(&text), None, None) {
            eprintln!("tracing bridge write failed: {error}");
        }
    }
}

#[derive(Debug, Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut text = self.message;
        text.push_str(&self.fields);
        text.trim_start().to_string()
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}
