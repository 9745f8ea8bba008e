//! Output strategies for loggers

use super::{log_level::LogLevel, record::Record};

/// Receives fully decorated records.
///
/// Implemented for any `Fn(&Record<'_>)` closure. Write failures are the
/// sink's own business; a sink must not panic on them.
pub trait Sink: Send + Sync {
    fn emit(&self, record: &Record<'_>);
}

impl<F> Sink for F
where
    F: Fn(&Record<'_>) + Send + Sync,
{
    #[inline]
    fn emit(&self, record: &Record<'_>) {
        self(record)
    }
}

/// Hands level, logger name and message to an external logger that adds
/// its own timestamp and caller information.
pub trait Wrap: Send + Sync {
    fn wrap(&self, level: LogLevel, name: Option<&str>, message: &str);
}

impl<F> Wrap for F
where
    F: Fn(LogLevel, Option<&str>, &str) + Send + Sync,
{
    #[inline]
    fn wrap(&self, level: LogLevel, name: Option<&str>, message: &str) {
        self(level, name, message)
    }
}
