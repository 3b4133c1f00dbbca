//! Pattern directive renderers and the code → renderer registry
//!
//! Each `%X` (or `%X{arg}`) directive in a pattern becomes one
//! [`FormatItem`]. Items are plain data: rendering reads the event, the
//! level and the borrowed logger, and never keeps a handle to any of them.
//!
//! | code | renders |
//! |------|---------|
//! | `m`  | message content |
//! | `p`  | level name |
//! | `r`  | elapsed milliseconds |
//! | `c`  | logger name |
//! | `t`  | thread id |
//! | `N`  | thread name |
//! | `F`  | fiber id |
//! | `d`  | timestamp, `%d{layout}` takes a strftime layout |
//! | `f`  | file name |
//! | `l`  | line number |
//! | `n`  | newline |
//! | `T`  | tab |

use super::{log_event::LogEvent, log_level::LogLevel, logger::Logger};
use chrono::format::{Item, StrftimeItems};
use std::collections::HashMap;
use std::fmt::Write;

/// Layout used by `%d` when no argument is given
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker rendered in place of an argument that was never closed with `}`
pub const PATTERN_ERROR_MARKER: &str = "<<pattern_error>>";

/// Constructor producing the renderer for one directive code from its argument
pub type DirectiveCtor = fn(&str) -> FormatItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    Literal(String),
    Message,
    Level,
    Elapsed,
    LoggerName,
    ThreadId,
    ThreadName,
    FiberId,
    Timestamp(String),
    FileName,
    LineNumber,
    Newline,
    Tab,
    /// Fixed text standing in for a directive that could not be understood
    ErrorMarker(String),
}

impl FormatItem {
    pub fn unknown_directive(code: &str) -> Self {
        FormatItem::ErrorMarker(format!("<<error_format %{}>>", code))
    }

    pub fn pattern_error() -> Self {
        FormatItem::ErrorMarker(PATTERN_ERROR_MARKER.to_string())
    }

    /// Timestamp renderer for `layout`, or an error marker if chrono cannot
    /// interpret the layout. Checking here keeps rendering infallible.
    pub fn timestamp(layout: &str) -> Self {
        let layout = if layout.is_empty() {
            DEFAULT_TIME_LAYOUT
        } else {
            layout
        };

        if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
            FormatItem::ErrorMarker(format!("<<error_format %d{{{}}}>>", layout))
        } else {
            FormatItem::Timestamp(layout.to_string())
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormatItem::ErrorMarker(_))
    }

    /// Append this item's fragment for `event` to `out`.
    pub fn render(&self, out: &mut String, logger: &Logger, level: LogLevel, event: &LogEvent) {
        // Writing into a String cannot fail.
        let _ = match self {
            FormatItem::Literal(text) | FormatItem::ErrorMarker(text) => {
                out.push_str(text);
                Ok(())
            }
            FormatItem::Message => {
                out.push_str(event.content());
                Ok(())
            }
            FormatItem::Level => {
                out.push_str(level.to_str());
                Ok(())
            }
            FormatItem::Elapsed => write!(out, "{}", event.elapsed()),
            FormatItem::LoggerName => {
                out.push_str(logger.name());
                Ok(())
            }
            FormatItem::ThreadId => write!(out, "{}", event.thread_id()),
            FormatItem::ThreadName => {
                out.push_str(event.thread_name());
                Ok(())
            }
            FormatItem::FiberId => write!(out, "{}", event.fiber_id()),
            FormatItem::Timestamp(layout) => write!(out, "{}", event.timestamp().format(layout)),
            FormatItem::FileName => {
                out.push_str(event.file());
                Ok(())
            }
            FormatItem::LineNumber => write!(out, "{}", event.line()),
            FormatItem::Newline => {
                out.push('\n');
                Ok(())
            }
            FormatItem::Tab => {
                out.push('\t');
                Ok(())
            }
        };
    }
}

/// Maps directive codes to the constructors of their renderers.
///
/// [`DirectiveRegistry::default`] holds the standard table; codes can be
/// added or remapped with [`DirectiveRegistry::register`] before building a
/// formatter with [`LogFormatter::with_registry`](super::LogFormatter::with_registry).
#[derive(Debug, Clone)]
pub struct DirectiveRegistry {
    ctors: HashMap<char, DirectiveCtor>,
}

impl DirectiveRegistry {
    /// A registry with no directives at all
    pub fn empty() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register('m', |_| FormatItem::Message);
        registry.register('p', |_| FormatItem::Level);
        registry.register('r', |_| FormatItem::Elapsed);
        registry.register('c', |_| FormatItem::LoggerName);
        registry.register('t', |_| FormatItem::ThreadId);
        registry.register('N', |_| FormatItem::ThreadName);
        registry.register('F', |_| FormatItem::FiberId);
        registry.register('d', FormatItem::timestamp);
        registry.register('f', |_| FormatItem::FileName);
        registry.register('l', |_| FormatItem::LineNumber);
        registry.register('n', |_| FormatItem::Newline);
        registry.register('T', |_| FormatItem::Tab);
        registry
    }

    /// Install `ctor` for `code`, returning the constructor it replaced.
    pub fn register(&mut self, code: char, ctor: DirectiveCtor) -> Option<DirectiveCtor> {
        self.ctors.insert(code, ctor)
    }

    pub fn resolve(&self, code: char, argument: &str) -> Option<FormatItem> {
        self.ctors.get(&code).map(|ctor| ctor(argument))
    }

    pub fn contains(&self, code: char) -> bool {
        self.ctors.contains_key(&code)
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
