//! Logging macros capturing the call site.
//!
//! Each macro builds a [`LogEvent`](crate::LogEvent) from `file!()`,
//! `line!()`, the calling thread and the current time, then hands it to the
//! logger. The message is only formatted when the logger's own threshold
//! lets the level through.
//!
//! # Examples
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::info;
//!
//! let logger = Logger::root();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::root();
/// use pattern_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.is_enabled(level) {
            let event = $crate::LogEvent::capture(file!(), line!())
                .with_message(format!($($arg)+));
            logger.log(level, &event);
        }
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::root();
/// use pattern_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::root();
/// use pattern_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
