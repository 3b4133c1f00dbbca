//! Pattern formatter
//!
//! A pattern is plain text interleaved with `%X` / `%X{arg}` directives;
//! `%%` is a literal percent sign. See [`format_item`](super::format_item)
//! for the directive table.
//!
//! Parsing never fails. Unknown codes and unterminated arguments are
//! replaced by visible error markers and flip [`LogFormatter::is_error`].

use super::{
    error::{LoggerError, Result},
    format_item::{DirectiveRegistry, FormatItem},
    log_event::LogEvent,
    log_level::LogLevel,
    logger::Logger,
};
use std::sync::Arc;

/// Pattern installed on a [`Logger`] that was not given one
pub const DEFAULT_PATTERN: &str = "%d{%Y-%m-%d %H:%M:%S} [%p] [%c] %f:%l %m%n";

enum ParseState {
    Literal,
    /// Just consumed `%`
    Directive,
    /// Inside `{...}` following the directive code
    Argument { code: char },
}

/// Parsed pattern, immutable once built and shared by `Arc` between
/// appenders and loggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormatter {
    pattern: String,
    items: Vec<FormatItem>,
    error: bool,
}

impl LogFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_registry(pattern, &DirectiveRegistry::standard())
    }

    /// Parse `pattern`, resolving directive codes through `registry`.
    pub fn with_registry(pattern: impl Into<String>, registry: &DirectiveRegistry) -> Self {
        let pattern = pattern.into();
        let mut parser = PatternParser::new(registry);
        parser.run(&pattern);
        let (items, error) = parser.finish();

        if error {
            eprintln!("[LOGGER WARNING] Pattern error in '{}'", pattern);
        }

        Self {
            pattern,
            items,
            error,
        }
    }

    /// Parse `pattern`, rejecting it if any part failed to parse.
    pub fn try_new(pattern: impl Into<String>) -> Result<Self> {
        let formatter = Self::new(pattern);
        if formatter.error {
            return Err(LoggerError::invalid_pattern(formatter.pattern));
        }
        Ok(formatter)
    }

    /// Wrap this formatter in an Arc for sharing across appenders
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Whether any directive or argument in the pattern failed to parse
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Render `event` as text.
    pub fn format(&self, logger: &Logger, level: LogLevel, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.content().len() + 32);
        self.format_to(&mut out, logger, level, event);
        out
    }

    /// Render `event`, appending to an existing buffer.
    pub fn format_to(&self, out: &mut String, logger: &Logger, level: LogLevel, event: &LogEvent) {
        for item in &self.items {
            item.render(out, logger, level, event);
        }
    }
}

impl Default for LogFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

struct PatternParser<'r> {
    registry: &'r DirectiveRegistry,
    items: Vec<FormatItem>,
    literal: String,
    argument: String,
    error: bool,
}

impl<'r> PatternParser<'r> {
    fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            items: Vec::new(),
            literal: String::new(),
            argument: String::new(),
            error: false,
        }
    }

    fn run(&mut self, pattern: &str) {
        let mut pending = self.scan(pattern);
        while let Some(rest) = pending {
            pending = self.scan(&rest);
        }
    }

    /// Scan `input` once. When an argument is left unterminated, returns the
    /// text to scan next: the buffered argument from its first whitespace
    /// on, or all of it when it has none. The result is always shorter than
    /// `input`, so `run` terminates.
    fn scan(&mut self, input: &str) -> Option<String> {
        let mut state = ParseState::Literal;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            state = match state {
                ParseState::Literal => {
                    if ch == '%' {
                        ParseState::Directive
                    } else {
                        self.literal.push(ch);
                        ParseState::Literal
                    }
                }
                ParseState::Directive if ch == '%' => {
                    self.literal.push('%');
                    ParseState::Literal
                }
                ParseState::Directive if ch.is_whitespace() => {
                    // `%` with no code before the whitespace
                    self.push_error(FormatItem::unknown_directive(""));
                    self.literal.push(ch);
                    ParseState::Literal
                }
                ParseState::Directive => {
                    if chars.next_if_eq(&'{').is_some() {
                        self.argument.clear();
                        ParseState::Argument { code: ch }
                    } else {
                        self.push_directive(ch, "");
                        ParseState::Literal
                    }
                }
                ParseState::Argument { code } => {
                    if ch == '}' {
                        let argument = std::mem::take(&mut self.argument);
                        self.push_directive(code, &argument);
                        ParseState::Literal
                    } else {
                        self.argument.push(ch);
                        ParseState::Argument { code }
                    }
                }
            };
        }

        match state {
            ParseState::Literal => None,
            ParseState::Directive => {
                self.push_error(FormatItem::unknown_directive(""));
                None
            }
            ParseState::Argument { .. } => {
                self.push_error(FormatItem::pattern_error());
                let argument = std::mem::take(&mut self.argument);
                let resume = argument.find(char::is_whitespace).unwrap_or(0);
                Some(argument[resume..].to_string())
            }
        }
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.items.push(FormatItem::Literal(text));
        }
    }

    fn push_directive(&mut self, code: char, argument: &str) {
        match self.registry.resolve(code, argument) {
            Some(item) if !item.is_error() => {
                self.flush_literal();
                self.items.push(item);
            }
            Some(item) => self.push_error(item),
            None => self.push_error(FormatItem::unknown_directive(&code.to_string())),
        }
    }

    fn push_error(&mut self, marker: FormatItem) {
        self.flush_literal();
        self.items.push(marker);
        self.error = true;
    }

    fn finish(mut self) -> (Vec<FormatItem>, bool) {
        self.flush_literal();
        (self.items, self.error)
    }
}
