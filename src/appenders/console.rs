//! Console sink and the shared line format

use crate::core::timestamp::{console_timestamp, CONSOLE_TIMESTAMP_WIDTH};
use crate::core::{Record, Sink};
use std::fmt::Write as _;
use std::io::Write;

/// Render a record as one console line, terminator included:
///
/// ```text
/// [01-08 10:30:45.12 ][INFO ] server started (app/main.rs:12)
/// [01-08 10:30:45.2  ][WARN ][db] pool exhausted (db/pool.rs:88)
/// ```
pub fn format_record(record: &Record<'_>) -> String {
    let mut line = String::with_capacity(
        CONSOLE_TIMESTAMP_WIDTH + record.message.len() + record.caller.len() + 16,
    );
    let _ = write!(
        line,
        "[{:<width$}][{:<5}]",
        console_timestamp(&record.timestamp),
        record.level,
        width = CONSOLE_TIMESTAMP_WIDTH
    );
    if let Some(name) = record.name.filter(|n| !n.is_empty()) {
        let _ = write!(line, "[{}]", name);
    }
    let _ = write!(line, " {} ({})\r\n", record.message, record.caller);
    line
}

/// Writes console-formatted lines to stderr.
///
/// Each record goes out in a single write so concurrent records do not
/// interleave. Write errors are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, record: &Record<'_>) {
        let line = format_record(record);
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }
}
