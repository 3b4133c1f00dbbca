//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity scale.
///
/// `Unknown` sits below every real level so that comparisons against a
/// threshold stay total even for values that came from outside the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(into = "String", try_from = "String")]
pub enum LogLevel {
    Unknown = 0,
    #[default]
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// Every level a caller can log at, lowest first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Unknown => "UNKNOWN",
        }
    }

    /// Convert a raw integer severity into a level.
    ///
    /// Values outside `1..=5` (negative ones included) degrade to
    /// [`LogLevel::Unknown`] instead of failing.
    pub fn from_raw(value: i32) -> Self {
        match value {
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            5 => LogLevel::Fatal,
            _ => LogLevel::Unknown,
        }
    }

    pub fn as_raw(&self) -> i32 {
        *self as i32
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Unknown => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl From<i32> for LogLevel {
    fn from(value: i32) -> Self {
        LogLevel::from_raw(value)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "UNKNOWN" => Ok(LogLevel::Unknown),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(LogLevel::Debug.to_str(), "DEBUG");
        assert_eq!(LogLevel::Info.to_str(), "INFO");
        assert_eq!(LogLevel::Warn.to_str(), "WARN");
        assert_eq!(LogLevel::Error.to_str(), "ERROR");
        assert_eq!(LogLevel::Fatal.to_str(), "FATAL");
        assert_eq!(LogLevel::Unknown.to_str(), "UNKNOWN");
    }

    #[test]
    fn test_out_of_range_values_are_unknown() {
        assert_eq!(LogLevel::from_raw(0), LogLevel::Unknown);
        assert_eq!(LogLevel::from_raw(-3), LogLevel::Unknown);
        assert_eq!(LogLevel::from_raw(6), LogLevel::Unknown);
        assert_eq!(LogLevel::from_raw(i32::MAX).to_string(), "UNKNOWN");
        assert_eq!(LogLevel::from(4), LogLevel::Error);
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Unknown < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" Info ".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&LogLevel::Error).expect("serialize");
        assert_eq!(json, "\"ERROR\"");

        let level: LogLevel = serde_json::from_str("\"fatal\"").expect("deserialize");
        assert_eq!(level, LogLevel::Fatal);

        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }
}
