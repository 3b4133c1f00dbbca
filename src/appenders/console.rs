//! Console appender implementation

use crate::core::{Appender, AppenderState, LogFormatter, LogLevel, Result};
use std::io::Write;
use std::sync::Arc;

/// Writes rendered events to standard output.
pub struct ConsoleAppender {
    state: AppenderState,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            state: AppenderState::default(),
            use_colors: false,
        }
    }

    /// Color each rendered line by its level (requires the `console` feature)
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_colors(true);
    /// ```
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            state: AppenderState::default(),
            use_colors,
        }
    }

    /// Set the threshold for this appender
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    /// Use `formatter` instead of the owning logger's default
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::ConsoleAppender;
    /// use pattern_logger::LogFormatter;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_formatter(LogFormatter::new("%p %m%n").shared());
    /// ```
    #[must_use]
    pub fn with_formatter(self, formatter: Arc<LogFormatter>) -> Self {
        self.state.set_formatter(Some(formatter));
        self
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    #[cfg(feature = "console")]
    fn write_colored(out: &mut impl Write, level: LogLevel, text: &str) -> std::io::Result<()> {
        use colored::Colorize;

        // Keep the trailing newline outside the escape sequence
        let body = text.trim_end_matches('\n');
        let tail = &text[body.len()..];
        write!(out, "{}{}", body.color(level.color_code()), tail)
    }

    #[cfg(not(feature = "console"))]
    fn write_colored(out: &mut impl Write, _level: LogLevel, text: &str) -> std::io::Result<()> {
        out.write_all(text.as_bytes())
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn state(&self) -> &AppenderState {
        &self.state
    }

    fn write_formatted(&self, level: LogLevel, text: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // A closed or broken stdout is not the caller's problem
        let _ = if self.use_colors {
            Self::write_colored(&mut out, level, text)
        } else {
            out.write_all(text.as_bytes())
        };
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
