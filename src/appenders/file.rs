//! File appender implementation

use crate::core::{Appender, AppenderState, LogFormatter, LogLevel, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Appends rendered events to a file.
///
/// The handle sits behind a mutex so that a write can never run through a
/// handle that [`FileAppender::reopen`] is closing. While the handle is
/// closed, writes are dropped and counted in [`FileAppender::dropped_count`].
pub struct FileAppender {
    state: AppenderState,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    auto_flush: bool,
    dropped: AtomicU64,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = Self::open_file(&path).map_err(|e| {
            LoggerError::io_operation(
                "opening log file",
                format!("cannot open '{}' for append", path.display()),
                e,
            )
        })?;

        let appender = Self::closed(path);
        *appender.writer.lock() = Some(BufWriter::new(file));
        Ok(appender)
    }

    /// Create an appender for `path` without opening it; call
    /// [`reopen`](Self::reopen) to start writing.
    pub fn closed(path: impl Into<PathBuf>) -> Self {
        Self {
            state: AppenderState::default(),
            path: path.into(),
            writer: Mutex::new(None),
            auto_flush: true,
            dropped: AtomicU64::new(0),
        }
    }

    /// Set the threshold for this appender
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    /// Use `formatter` instead of the owning logger's default
    #[must_use]
    pub fn with_formatter(self, formatter: Arc<LogFormatter>) -> Self {
        self.state.set_formatter(Some(formatter));
        self
    }

    /// Flush after every record (default) or only on [`Appender::flush`]
    #[must_use]
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Number of writes dropped because the handle was closed or failed
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the current handle (if any) and open the stored path again.
    ///
    /// Used after the file was moved away by external rotation. Returns
    /// whether the file is open afterwards.
    pub fn reopen(&self) -> bool {
        let mut writer = self.writer.lock();
        if let Some(mut old) = writer.take() {
            if let Err(e) = old.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush '{}' before reopening: {}",
                    self.path.display(),
                    e
                );
            }
        }

        match Self::open_file(&self.path) {
            Ok(file) => {
                *writer = Some(BufWriter::new(file));
                true
            }
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to reopen '{}': {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    /// Flush and release the handle. Later writes are dropped until
    /// [`reopen`](Self::reopen) succeeds.
    pub fn close(&self) -> Result<()> {
        match self.writer.lock().take() {
            Some(mut writer) => {
                writer.flush()?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn open_file(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }
}

impl Appender for FileAppender {
    fn state(&self) -> &AppenderState {
        &self.state
    }

    fn write_formatted(&self, _level: LogLevel, text: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let Some(writer) = guard.as_mut() else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(LoggerError::handle_closed(self.path.display().to_string()));
        };

        let result = writer.write_all(text.as_bytes()).and_then(|()| {
            if self.auto_flush {
                writer.flush()
            } else {
                Ok(())
            }
        });

        if let Err(e) = result {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(LoggerError::io_operation(
                "writing log file",
                self.path.display().to_string(),
                e,
            ));
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut guard = self.writer.lock();
        if let Some(writer) = guard.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
