//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Threshold code above the highest level of the scale
    #[error("invalid root level: {code} (highest level is {max})")]
    InvalidLevel { code: u8, max: u8 },

    /// Level name that does not parse
    #[error("Invalid log level: '{0}'")]
    UnknownLevelName(String),

    /// Builder finished without a sink or wrap function
    #[error("Logger has no output: configure a sink or a wrap function")]
    MissingOutput,

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoggerError {
    /// Create an invalid threshold error
    pub fn invalid_level(code: u8, max: u8) -> Self {
        LoggerError::InvalidLevel { code, max }
    }

    /// Create an unknown level name error
    pub fn unknown_level_name(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevelName(name.into())
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}
