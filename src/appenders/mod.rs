//! Appender implementations

pub mod console;
pub mod file;

pub use console::ConsoleAppender;
pub use file::FileAppender;

// Re-export the trait so sinks can be written against this module alone
pub use crate::core::{AppendOutcome, Appender, AppenderState};
