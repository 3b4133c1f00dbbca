//! Appender trait for log output destinations
//!
//! An appender is a sink with its own severity threshold. The logger's gate
//! and the appender's gate are independent: an event reaches the sink only
//! if it passes both.

use super::{
    error::Result, formatter::LogFormatter, log_event::LogEvent, log_level::LogLevel,
    logger::Logger,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// What happened to an event handed to [`Appender::log`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Written,
    /// Below the appender's threshold
    Filtered,
    /// No formatter assigned yet
    Unformatted,
    /// The sink rejected the write
    Failed,
}

/// Threshold and formatter slot shared by every appender implementation.
///
/// Both fields sit behind their own lock so that level and formatter
/// changes are exclusive with respect to concurrent writes.
#[derive(Debug)]
pub struct AppenderState {
    level: RwLock<LogLevel>,
    formatter: RwLock<Option<Arc<LogFormatter>>>,
}

impl AppenderState {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: RwLock::new(level),
            formatter: RwLock::new(None),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn formatter(&self) -> Option<Arc<LogFormatter>> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Option<Arc<LogFormatter>>) {
        *self.formatter.write() = formatter;
    }

    /// Install `formatter` only if no formatter is assigned. Returns whether
    /// it was installed.
    pub fn set_formatter_if_absent(&self, formatter: Arc<LogFormatter>) -> bool {
        let mut slot = self.formatter.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(formatter);
        true
    }
}

impl Default for AppenderState {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

pub trait Appender: Send + Sync {
    /// Threshold and formatter slot of this appender
    fn state(&self) -> &AppenderState;

    /// Deliver already rendered text to the sink.
    fn write_formatted(&self, level: LogLevel, text: &str) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;

    fn level(&self) -> LogLevel {
        self.state().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.state().set_level(level);
    }

    fn formatter(&self) -> Option<Arc<LogFormatter>> {
        self.state().formatter()
    }

    fn set_formatter(&self, formatter: Arc<LogFormatter>) {
        self.state().set_formatter(Some(formatter));
    }

    /// Gate `event` on this appender's threshold, render it and write it.
    ///
    /// Never fails from the caller's point of view; the outcome says whether
    /// anything reached the sink.
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> AppendOutcome {
        if level < self.level() {
            return AppendOutcome::Filtered;
        }

        let Some(formatter) = self.formatter() else {
            return AppendOutcome::Unformatted;
        };

        let text = formatter.format(logger, level, event);
        match self.write_formatted(level, &text) {
            Ok(()) => AppendOutcome::Written,
            Err(_) => AppendOutcome::Failed,
        }
    }
}
