//! Serializable logger configuration

use super::{
    log_level::{LevelScale, LogLevel},
    logger::LoggerBuilder,
};
use serde::{Deserialize, Serialize};

/// Logger settings that can be loaded with any serde format.
///
/// The output is not part of the configuration; attach one to the builder
/// returned by [`LoggerConfig::builder`].
///
/// # Example
///
/// ```
/// use logadapter::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig {
///     min_level: LogLevel::Warn,
///     name: "api".to_string(),
///     ..LoggerConfig::default()
/// };
/// let logger = config.builder().writer(std::io::sink()).build().unwrap();
/// assert_eq!(logger.name(), "api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub scale: LevelScale,
    pub caller_skip: usize,
    /// Empty for an unnamed logger.
    pub name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            scale: LevelScale::Full,
            caller_skip: 0,
            name: String::new(),
        }
    }
}

impl LoggerConfig {
    /// A builder carrying these settings, without an output.
    pub fn builder(&self) -> LoggerBuilder {
        LoggerBuilder::new()
            .scale(self.scale)
            .min_level(self.min_level)
            .caller_skip(self.caller_skip)
            .name(self.name.clone())
    }
}
