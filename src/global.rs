//! Process-wide default logger
//!
//! The default writes console-formatted lines to stderr at every level. It
//! can be replaced as a whole with [`set_console`] but never changed in
//! place; loggers obtained earlier keep their configuration.

use crate::core::{LogArgs, LogLevel, Logger};
use parking_lot::RwLock;
use std::sync::LazyLock;

static CONSOLE: LazyLock<RwLock<Logger>> =
    LazyLock::new(|| RwLock::new(Logger::stderr(LogLevel::Debug)));

/// The current default logger.
pub fn console() -> Logger {
    CONSOLE.read().clone()
}

/// Replace the default logger, returning the previous one.
///
/// # Example
///
/// ```
/// use logadapter::{LogLevel, Logger};
///
/// let previous = logadapter::set_console(Logger::to_writer(LogLevel::Warn, std::io::sink()));
/// logadapter::info("dropped by the new default");
/// logadapter::set_console(previous);
/// ```
pub fn set_console(logger: Logger) -> Logger {
    std::mem::replace(&mut *CONSOLE.write(), logger)
}

/// The default logger carrying `name`.
pub fn named(name: &str) -> Logger {
    console().named(name)
}

#[track_caller]
pub fn debug(args: impl LogArgs) {
    console().debug(args);
}

#[track_caller]
pub fn debugf(template: &str, args: impl LogArgs) {
    console().debugf(template, args);
}

#[track_caller]
pub fn verbose(args: impl LogArgs) {
    console().verbose(args);
}

#[track_caller]
pub fn verbosef(template: &str, args: impl LogArgs) {
    console().verbosef(template, args);
}

#[track_caller]
pub fn info(args: impl LogArgs) {
    console().info(args);
}

#[track_caller]
pub fn infof(template: &str, args: impl LogArgs) {
    console().infof(template, args);
}

#[track_caller]
pub fn warn(args: impl LogArgs) {
    console().warn(args);
}

#[track_caller]
pub fn warnf(template: &str, args: impl LogArgs) {
    console().warnf(template, args);
}

#[track_caller]
pub fn error(args: impl LogArgs) {
    console().error(args);
}

#[track_caller]
pub fn errorf(template: &str, args: impl LogArgs) {
    console().errorf(template, args);
}

/// Log at FATAL on the default logger, then exit with status 1.
#[track_caller]
pub fn fatal(args: impl LogArgs) -> ! {
    console().fatal(args)
}

/// Log a formatted message at FATAL on the default logger, then exit with
/// status 1.
#[track_caller]
pub fn fatalf(template: &str, args: impl LogArgs) -> ! {
    console().fatalf(template, args)
}
