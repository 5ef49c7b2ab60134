//! Logger metrics for observability
//!
//! Counters describing what happened to the records handed to a logger:
//! how many were written to each sink, how many were filtered out or had no
//! open sink at all, how many
//! file writes failed and how often the file was rotated.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use sapling::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_file_write(42);
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.file_written(), 1);
/// assert_eq!(metrics.bytes_written(), 42);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Number of `log` calls processed
    total_logged: AtomicU64,

    /// Lines delivered to the console sink
    console_written: AtomicU64,

    /// Lines appended to a log file
    file_written: AtomicU64,

    /// Bytes appended to log files, newlines included
    bytes_written: AtomicU64,

    /// Records every open sink rejected by severity
    filtered: AtomicU64,

    /// Records dropped because no sink was open (console off, file closed or disabled)
    unrouted: AtomicU64,

    /// Completed file swaps
    rotations: AtomicU64,

    /// Failed console or file writes
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            console_written: AtomicU64::new(0),
            file_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            unrouted: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_written(&self) -> u64 {
        self.console_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_written(&self) -> u64 {
        self.file_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unrouted(&self) -> u64 {
        self.unrouted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record a processed `log` call
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_write(&self) -> u64 {
        self.console_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record one appended file line of `bytes` bytes
    #[inline]
    pub fn record_file_write(&self, bytes: u64) -> u64 {
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
        self.file_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_unrouted(&self) -> u64 {
        self.unrouted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.console_written.store(0, Ordering::Relaxed);
        self.file_written.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.unrouted.store(0, Ordering::Relaxed);
        self.rotations.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            console_written: AtomicU64::new(self.console_written()),
            file_written: AtomicU64::new(self.file_written()),
            bytes_written: AtomicU64::new(self.bytes_written()),
            filtered: AtomicU64::new(self.filtered()),
            unrouted: AtomicU64::new(self.unrouted()),
            rotations: AtomicU64::new(self.rotations()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}
