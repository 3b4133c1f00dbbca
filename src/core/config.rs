//! Serializable logger configuration
//!
//! ```
//! use pattern_logger::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "name": "http",
//!     "level": "info",
//!     "pattern": "[%p] %m%n",
//!     "appenders": [ { "type": "console", "level": "WARN" } ]
//! }"#).unwrap();
//!
//! let logger = config.build().unwrap();
//! assert_eq!(logger.name(), "http");
//! assert_eq!(logger.appender_count(), 1);
//! ```

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    formatter::{LogFormatter, DEFAULT_PATTERN},
    log_level::LogLevel,
    logger::Logger,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

/// One sink of a [`LoggerConfig`]. A `pattern` of `None` means the appender
/// takes the logger's default formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AppenderConfig {
    Console {
        #[serde(default)]
        level: LogLevel,
        #[serde(default)]
        pattern: Option<String>,
        #[serde(default)]
        colors: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        level: LogLevel,
        #[serde(default)]
        pattern: Option<String>,
    },
}

impl AppenderConfig {
    pub fn pattern(&self) -> Option<&str> {
        match self {
            AppenderConfig::Console { pattern, .. } | AppenderConfig::File { pattern, .. } => {
                pattern.as_deref()
            }
        }
    }

    /// Open the sink described by this entry.
    pub fn build(&self) -> Result<Arc<dyn Appender>> {
        let formatter = match self.pattern() {
            Some(pattern) => Some(LogFormatter::try_new(pattern)?.shared()),
            None => None,
        };

        let appender: Arc<dyn Appender> = match self {
            AppenderConfig::Console { level, colors, .. } => {
                Arc::new(ConsoleAppender::with_colors(*colors).with_level(*level))
            }
            AppenderConfig::File { path, level, .. } => {
                if path.as_os_str().is_empty() {
                    return Err(LoggerError::config("file appender", "path is empty"));
                }
                Arc::new(FileAppender::new(path.clone())?.with_level(*level))
            }
        };

        if let Some(formatter) = formatter {
            appender.set_formatter(formatter);
        }
        Ok(appender)
    }
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::default(),
            pattern: default_pattern(),
            appenders: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of logger configurations
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check everything that can be checked without touching the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("logger", "name is empty"));
        }

        LogFormatter::try_new(self.pattern.as_str())?;
        for appender in &self.appenders {
            if let Some(pattern) = appender.pattern() {
                LogFormatter::try_new(pattern)?;
            }
        }
        Ok(())
    }

    /// Build the logger and open all of its sinks.
    pub fn build(&self) -> Result<Logger> {
        self.validate()?;

        let logger = Logger::builder()
            .name(self.name.as_str())
            .level(self.level)
            .formatter(LogFormatter::try_new(self.pattern.as_str())?.shared())
            .build();

        for appender in &self.appenders {
            logger.add_appender(appender.build()?);
        }
        Ok(logger)
    }
}
