//! Logging macros with `format!` syntax.
//!
//! The macros take a [`Logger`](crate::Logger) followed by `format!`-style
//! arguments. Formatting happens only when the level passes the logger's
//! threshold, and the caller location is the macro call site.
//!
//! # Examples
//!
//! ```
//! use logadapter::prelude::*;
//! use logadapter::info;
//!
//! let logger = Logger::to_writer(LogLevel::Debug, std::io::sink());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// Unlike [`fatal!`](crate::fatal), `log!` at FATAL does not exit.
///
/// # Examples
///
/// ```
/// # use logadapter::prelude::*;
/// # let logger = Logger::to_writer(LogLevel::Debug, std::io::sink());
/// use logadapter::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_args($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use logadapter::prelude::*;
/// # let logger = Logger::to_writer(LogLevel::Debug, std::io::sink());
/// use logadapter::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use logadapter::prelude::*;
/// # let logger = Logger::to_writer(LogLevel::Debug, std::io::sink());
/// use logadapter::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use logadapter::prelude::*;
/// # let logger = Logger::to_writer(LogLevel::Debug, std::io::sink());
/// use logadapter::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then exit the process with status 1.
///
/// # Examples
///
/// ```no_run
/// # use logadapter::prelude::*;
/// # let logger = Logger::to_writer(LogLevel::Debug, std::io::sink());
/// use logadapter::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_args(::std::format_args!($($arg)+))
    };
}
