//! Logger metrics for observability
//!
//! Counters describing what happened to events at each gate of the
//! logger → appender pipeline.

use super::appender::AppendOutcome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use pattern_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_accepted();
/// metrics.record_rejected();
///
/// assert_eq!(metrics.accepted_count(), 1);
/// assert_eq!(metrics.rejected_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Events that passed the logger's threshold
    accepted: AtomicU64,

    /// Events stopped by the logger's threshold
    rejected: AtomicU64,

    /// Appender deliveries that reached a sink
    written: AtomicU64,

    /// Appender deliveries stopped by an appender's threshold
    filtered: AtomicU64,

    /// Appender deliveries lost to a sink error, a panic or a missing formatter
    failed: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one appender delivery. Returns the previous failure count when
    /// the delivery failed.
    pub fn record_outcome(&self, outcome: AppendOutcome) -> Option<u64> {
        match outcome {
            AppendOutcome::Written => {
                self.written.fetch_add(1, Ordering::Relaxed);
                None
            }
            AppendOutcome::Filtered => {
                self.filtered.fetch_add(1, Ordering::Relaxed);
                None
            }
            AppendOutcome::Unformatted | AppendOutcome::Failed => {
                Some(self.failed.fetch_add(1, Ordering::Relaxed))
            }
        }
    }

    /// Percentage of appender deliveries that failed
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count();
        let total = failed + self.written_count();
        if total == 0 {
            return 0.0;
        }
        (failed as f64 / total as f64) * 100.0
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}
