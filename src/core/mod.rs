//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod record;
pub mod sink;
pub mod stack;
pub mod timestamp;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use log_level::{severity_name, LevelScale, LogLevel};
pub use logger::{Logger, LoggerBuilder, Threshold, FATAL_EXIT_CODE};
pub use message::{Debugged, Displayed, LogArgs, LogValue, Value};
pub use record::Record;
pub use sink::{Sink, Wrap};
pub use stack::current_stack;
