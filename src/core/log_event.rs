//! Log event structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);
static PROCESS_START: OnceLock<Instant> = OnceLock::new();

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<u64>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached numeric thread ID, assigning one on first access
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        *cache
            .borrow_mut()
            .get_or_insert_with(|| NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed))
    })
}

/// Get cached thread name, computing and caching it on first access
pub fn current_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().unwrap_or("").to_string())
            .clone()
    })
}

/// Milliseconds since the logging clock was first read in this process.
pub fn elapsed_millis() -> u64 {
    let start = PROCESS_START.get_or_init(Instant::now);
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Snapshot of one log occurrence.
///
/// Everything except the message is fixed at construction. The message can
/// be accumulated through [`fmt::Write`] until the event is handed to a
/// logger by shared reference, after which nothing can change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    file: String,
    line: u32,
    elapsed: u64,
    thread_id: u64,
    #[serde(default)]
    thread_name: String,
    fiber_id: u64,
    timestamp: DateTime<Utc>,
    content: String,
}

impl LogEvent {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        elapsed: u64,
        thread_id: u64,
        fiber_id: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            elapsed,
            thread_id,
            thread_name: String::new(),
            fiber_id,
            timestamp,
            content: String::new(),
        }
    }

    /// Build an event for the calling thread at the current instant.
    pub fn capture(file: impl Into<String>, line: u32) -> Self {
        Self::new(file, line, elapsed_millis(), current_thread_id(), 0, Utc::now())
            .with_thread_name(current_thread_name())
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.content = message.into();
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    #[must_use]
    pub fn with_fiber_id(mut self, fiber_id: u64) -> Self {
        self.fiber_id = fiber_id;
        self
    }

    pub fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn fiber_id(&self) -> u64 {
        self.fiber_id
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Write for LogEvent {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.content.push_str(s);
        Ok(())
    }
}
