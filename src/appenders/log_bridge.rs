//! Wrap output delegating to the `log` crate facade

use crate::core::{LogLevel, Logger, Threshold};

/// Target used for records from unnamed loggers.
pub const DEFAULT_TARGET: &str = "logadapter";

/// Map a level onto the `log` crate's levels.
///
/// `log` has no verbose or fatal level: verbose becomes debug and fatal
/// becomes error.
pub fn to_log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Debug | LogLevel::Verbose => log::Level::Debug,
        LogLevel::Info => log::Level::Info,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Error | LogLevel::Fatal => log::Level::Error,
    }
}

/// Forward one message to the installed `log` logger.
///
/// The logger name becomes the record target. File and line are left
/// unset; the `log` backend decides what to decorate the line with.
pub fn forward_to_log(level: LogLevel, name: Option<&str>, message: &str) {
    let level = to_log_level(level);
    if level > log::max_level() {
        return;
    }
    let target = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_TARGET);
    log::logger().log(
        &log::Record::builder()
            .level(level)
            .target(target)
            .args(format_args!("{}", message))
            .build(),
    );
}

impl Logger {
    /// A wrapping logger that forwards every message to the `log` facade.
    ///
    /// # Panics
    ///
    /// Panics if `min_level` is a code above the highest level.
    #[must_use]
    #[track_caller]
    pub fn wrap_log(min_level: impl Into<Threshold>) -> Logger {
        Logger::wrap(min_level, forward_to_log)
    }
}
