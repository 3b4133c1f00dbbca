//! # Pattern Logger
//!
//! An in-process logging framework. Events are rendered through a small
//! pattern language and fanned out from a [`Logger`] to any number of
//! appenders, each gated by its own severity threshold.
//!
//! ## Features
//!
//! - **Pattern templates**: `%d{%H:%M:%S} [%p] %c %f:%l %m%n`
//! - **Two independent gates**: logger threshold, then appender threshold
//! - **Console and file appenders**, with manual `reopen` for rotated files
//! - **Thread safe**: share loggers through `Arc` across producer threads
//!
//! ```
//! use pattern_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .level(LogLevel::Info)
//!     .pattern("[%p] %m%n")
//!     .appender(Arc::new(ConsoleAppender::new()))
//!     .build();
//!
//! let event = LogEvent::capture(file!(), line!()).with_message("hello");
//! logger.info(&event);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        AppendOutcome, Appender, AppenderConfig, AppenderState, DirectiveRegistry, FormatItem,
        LogEvent, LogFormatter, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, LoggerRegistry, Result, DEFAULT_PATTERN,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::{
    AppendOutcome, Appender, AppenderConfig, AppenderState, DirectiveCtor, DirectiveRegistry,
    FormatItem, LogEvent, LogFormatter, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, LoggerRegistry, Result, DEFAULT_PATTERN, DEFAULT_TIME_LAYOUT,
    ROOT_LOGGER_NAME,
};
