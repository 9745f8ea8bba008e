//! Output implementations

pub mod console;
pub mod file;
#[cfg(feature = "log")]
pub mod log_bridge;

pub use console::{format_record, ConsoleSink};
pub use file::WriterSink;
#[cfg(feature = "log")]
pub use log_bridge::forward_to_log;
