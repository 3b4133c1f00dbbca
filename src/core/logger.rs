//! Main logger implementation

use super::{
    appender::{AppendOutcome, Appender},
    error::Result,
    formatter::LogFormatter,
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Name given to [`Logger::root`]
pub const ROOT_LOGGER_NAME: &str = "root";

/// Named severity gate fanning events out to its appenders.
///
/// All methods take `&self`; the threshold, the default formatter and the
/// appender list each sit behind a reader/writer lock, so one logger can be
/// shared through an `Arc` by any number of producer threads.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    formatter: RwLock<Arc<LogFormatter>>,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Debug),
            formatter: RwLock::new(LogFormatter::default().shared()),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    #[must_use]
    pub fn root() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Whether an event at `level` would pass this logger's own threshold
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.level.read()
    }

    /// Formatter handed to appenders added without one
    pub fn formatter(&self) -> Arc<LogFormatter> {
        Arc::clone(&self.formatter.read())
    }

    /// Replace the default formatter.
    ///
    /// Appenders that already received the previous default keep it.
    pub fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        *self.formatter.write() = formatter;
    }

    /// Parse `pattern` and install it as the default formatter if it parsed
    /// cleanly. Returns whether it was installed.
    pub fn set_pattern(&self, pattern: &str) -> bool {
        let formatter = LogFormatter::new(pattern);
        if formatter.is_error() {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' kept its formatter, pattern '{}' is invalid",
                self.name, pattern
            );
            return false;
        }
        self.set_formatter(formatter.shared());
        true
    }

    /// Register `appender`, giving it this logger's current default
    /// formatter if it has none.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        appender.state().set_formatter_if_absent(self.formatter());
        self.appenders.write().push(appender);
    }

    /// Remove the first registration of `appender` (compared by identity).
    /// Returns whether anything was removed.
    pub fn del_appender<A: Appender + ?Sized>(&self, appender: &Arc<A>) -> bool {
        let target = Arc::as_ptr(appender) as *const ();
        let mut appenders = self.appenders.write();
        match appenders
            .iter()
            .position(|candidate| Arc::as_ptr(candidate) as *const () == target)
        {
            Some(index) => {
                appenders.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    /// Snapshot of the registered appenders in registration order
    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Dispatch `event` to every appender if `level` passes this logger's
    /// threshold. Each appender then applies its own threshold.
    ///
    /// **Per-Appender Panic Isolation**: a panicking appender is reported on
    /// stderr and the remaining appenders still receive the event.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if !self.is_enabled(level) {
            self.metrics.record_rejected();
            return;
        }
        self.metrics.record_accepted();

        // Appenders may use the logger they are handed, so no lock is held
        // while they run.
        let appenders = self.appenders();
        for (idx, appender) in appenders.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(self, level, event)
            }));

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ('{}') panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        panic_msg
                    );
                    AppendOutcome::Failed
                }
            };

            if let Some(previous) = self.metrics.record_outcome(outcome) {
                // Alert on first failure and periodically thereafter
                if previous == 0 || (previous + 1) % 1000 == 0 {
                    eprintln!(
                        "[LOGGER ERROR] Logger '{}': appender #{} ('{}') did not write ({:?}), \
                         {} deliveries lost so far",
                        self.name,
                        idx,
                        appender.name(),
                        outcome,
                        previous + 1
                    );
                }
            }
        }
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Flush every appender, stopping at the first failure
    pub fn flush(&self) -> Result<()> {
        for appender in self.appenders() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::Logger;
    ///
    /// let logger = Logger::root();
    ///
    /// // After logging operations...
    /// let metrics = logger.metrics();
    /// println!("Accepted: {}", metrics.accepted_count());
    /// println!("Failure rate: {:.2}%", metrics.failure_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use pattern_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("http")
    ///     .level(LogLevel::Info)
    ///     .pattern("[%p] %m%n")
    ///     .build();
    /// assert_eq!(logger.name(), "http");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("pattern", &self.formatter().pattern())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush logger '{}' on drop: {}", self.name, e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use pattern_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .name("app")
///     .level(LogLevel::Debug)
///     .appender(Arc::new(ConsoleAppender::new()))
///     .build();
/// assert_eq!(logger.appender_count(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    formatter: Option<Arc<LogFormatter>>,
    appenders: Vec<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: LogLevel::Debug,
            formatter: None,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Default pattern, parsed leniently (errors render as markers)
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.formatter = Some(LogFormatter::new(pattern).shared());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<LogFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Add an appender; it receives the default formatter at build time if
    /// it has none.
    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_level(self.level);
        if let Some(formatter) = self.formatter {
            logger.set_formatter(formatter);
        }
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
