//! Log level definitions and level scales

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name reported for any numeric level code a scale does not define.
///
/// Unknown codes are reported as `WARN` rather than a dedicated sentinel.
/// Callers that feed raw codes through [`severity_name`] can rely on this.
pub const UNKNOWN_LEVEL_NAME: &str = "WARN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug = 0,
    /// Sits between debug and info, for chasing one problem when debug
    /// output is too noisy. Best removed or lowered once resolved.
    #[serde(rename = "VERBO", alias = "VERBOSE")]
    Verbose = 1,
    Info = 2,
    #[serde(alias = "WARNING")]
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Verbose,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBO",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Numeric code on the full scale.
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "VERBO" | "VERBOSE" => Ok(LogLevel::Verbose),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::unknown_level_name(s)),
        }
    }
}

/// Returns the display name of a full-scale level code.
///
/// Codes outside `0..=5` map to [`UNKNOWN_LEVEL_NAME`].
pub fn severity_name(code: u8) -> &'static str {
    LevelScale::Full.name(code)
}

/// The set of levels a logger operates on.
///
/// A logger picks one scale at construction and never mixes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelScale {
    /// DEBUG < VERBOSE < INFO < WARN < ERROR < FATAL, codes `0..=5`.
    #[default]
    Full,
    /// DEBUG < INFO < WARN < ERROR < FATAL, codes `0..=4`.
    ///
    /// Verbose calls are folded into DEBUG.
    Collapsed,
}

impl LevelScale {
    const COLLAPSED: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Levels of this scale in ascending order.
    pub fn levels(&self) -> &'static [LogLevel] {
        match self {
            LevelScale::Full => &LogLevel::ALL,
            LevelScale::Collapsed => &Self::COLLAPSED,
        }
    }

    /// Highest valid numeric code.
    pub fn max_code(&self) -> u8 {
        (self.levels().len() - 1) as u8
    }

    pub fn level(&self, code: u8) -> Option<LogLevel> {
        self.levels().get(usize::from(code)).copied()
    }

    pub fn code(&self, level: LogLevel) -> u8 {
        let level = self.normalize(level);
        self.levels()
            .iter()
            .position(|l| *l == level)
            .map_or(0, |idx| idx as u8)
    }

    /// Maps a level onto this scale.
    #[inline]
    pub fn normalize(&self, level: LogLevel) -> LogLevel {
        match (self, level) {
            (LevelScale::Collapsed, LogLevel::Verbose) => LogLevel::Debug,
            _ => level,
        }
    }

    pub fn name(&self, code: u8) -> &'static str {
        self.level(code).map_or(UNKNOWN_LEVEL_NAME, |level| level.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Verbose);
        assert!(LogLevel::Verbose < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_severity_names() {
        assert_eq!(severity_name(0), "DEBUG");
        assert_eq!(severity_name(1), "VERBO");
        assert_eq!(severity_name(2), "INFO");
        assert_eq!(severity_name(3), "WARN");
        assert_eq!(severity_name(4), "ERROR");
        assert_eq!(severity_name(5), "FATAL");
    }

    // Unknown codes read as WARN. Pinned here so a change is deliberate.
    #[test]
    fn test_unknown_code_falls_back_to_warn() {
        assert_eq!(severity_name(6), "WARN");
        assert_eq!(severity_name(200), "WARN");
        assert_eq!(LevelScale::Collapsed.name(5), "WARN");
    }

    #[test]
    fn test_collapsed_scale() {
        let scale = LevelScale::Collapsed;
        assert_eq!(scale.max_code(), 4);
        assert_eq!(scale.level(1), Some(LogLevel::Info));
        assert_eq!(scale.level(4), Some(LogLevel::Fatal));
        assert_eq!(scale.level(5), None);
        assert_eq!(scale.name(1), "INFO");
        assert_eq!(scale.normalize(LogLevel::Verbose), LogLevel::Debug);
        assert_eq!(scale.code(LogLevel::Verbose), 0);
        assert_eq!(scale.code(LogLevel::Error), 3);
    }

    #[test]
    fn test_full_scale_codes_match_discriminants() {
        for level in LogLevel::ALL {
            assert_eq!(LevelScale::Full.code(level), level.code());
            assert_eq!(LevelScale::Full.level(level.code()), Some(level));
        }
        assert_eq!(LevelScale::Full.max_code(), 5);
    }

    #[test]
    fn test_parse() {
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("VERBO".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("trace".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_honours_padding() {
        assert_eq!(format!("[{:<5}]", LogLevel::Info), "[INFO ]");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }
}
