//! # logadapter
//!
//! A small leveled logging front end for applications that want one logging
//! call style while choosing where messages end up.
//!
//! ## Features
//!
//! - **Six levels**: DEBUG, VERBOSE, INFO, WARN, ERROR, FATAL, with a
//!   collapsed five-level scale for hosts without a verbose level
//! - **Two output modes**: direct sinks receive decorated [`Record`]s;
//!   wrap functions delegate to another logging library
//! - **Caller locations** from `#[track_caller]`, with an optional frame skip
//! - **Lazy assembly**: filtered calls never format their message
//! - **Process-wide default** logging to stderr, replaceable as a whole
//!
//! ## Example
//!
//! ```
//! use logadapter::prelude::*;
//!
//! let logger = Logger::to_writer(LogLevel::Info, std::io::sink()).named("http");
//! logger.infof("listening on %s:%d", ("0.0.0.0", 8080));
//! logger.debug("not written");
//!
//! logadapter::warn(("disk usage ", 91, "%"));
//! ```

pub mod appenders;
pub mod core;
mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleSink, WriterSink};
    pub use crate::core::{
        current_stack, Debugged, Displayed, LevelScale, LogArgs, LogLevel, LogValue, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, Record, Result, Sink, Threshold, Wrap,
    };
}

#[cfg(feature = "log")]
pub use crate::appenders::forward_to_log;
pub use crate::appenders::{format_record, ConsoleSink, WriterSink};
pub use crate::core::{
    current_stack, severity_name, Debugged, Displayed, LevelScale, LogArgs, LogLevel, LogValue,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, Record, Result, Sink, Threshold, Value,
    Wrap, FATAL_EXIT_CODE,
};
pub use crate::global::{
    console, debug, debugf, error, errorf, fatal, fatalf, info, infof, named, set_console,
    verbose, verbosef, warn, warnf,
};
