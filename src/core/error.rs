//! Error types for the logger system
//!
//! These errors surface only while building loggers, formatters and sinks.
//! The logging path itself (`Logger::log`, `Appender::log`,
//! `LogFormatter::format`) never hands one back to the caller.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
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

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Write attempted while the file handle is closed
    #[error("File handle for '{path}' is closed")]
    HandleClosed { path: String },

    /// Pattern that produced error markers while parsing
    #[error("Invalid log pattern: '{pattern}'")]
    InvalidPattern { pattern: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
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

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn handle_closed(path: impl Into<String>) -> Self {
        LoggerError::HandleClosed { path: path.into() }
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
