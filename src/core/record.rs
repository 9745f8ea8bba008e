//! Log record handed to direct sinks

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// A fully decorated log record.
///
/// Records are built per call and only live for the duration of the sink
/// invocation. Sinks that need to keep data must copy it out.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: LogLevel,
    /// Logger name, `None` for unnamed loggers.
    pub name: Option<&'a str>,
    pub timestamp: DateTime<Local>,
    /// `dir/file.rs:line` of the logging call, or `"undefined"`.
    pub caller: &'a str,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(level: LogLevel, caller: &'a str, message: &'a str) -> Self {
        Self {
            level,
            name: None,
            timestamp: Local::now(),
            caller,
            message,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<&'a str>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
