//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod format_item;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;

pub use appender::{AppendOutcome, Appender, AppenderState};
pub use config::{AppenderConfig, LoggerConfig};
pub use error::{LoggerError, Result};
pub use format_item::{DirectiveCtor, DirectiveRegistry, FormatItem, DEFAULT_TIME_LAYOUT};
pub use formatter::{LogFormatter, DEFAULT_PATTERN};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, ROOT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use registry::LoggerRegistry;
