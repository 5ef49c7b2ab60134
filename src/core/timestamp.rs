//! Clock and timestamp formatting utilities
//!
//! All time used by the logger comes through a [`Clock`], so record
//! timestamps, rotation deadlines and rotated file names can be driven
//! deterministically in tests with [`ManualClock`].

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The real local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// # Examples
///
/// ```
/// use sapling::core::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(5));
/// assert_eq!((clock.now() - start).num_seconds(), 5);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock()
    }
}

/// Timestamp precision used in log lines and rotated file names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45`, file names `2025-01-08_10-30-45`
    #[default]
    Seconds,

    /// `2025-01-08 10:30:45.123456`, file names `2025-01-08_10-30-45-123456`
    Micros,
}

impl TimestampFormat {
    #[must_use]
    pub fn from_micros_flag(show_microseconds: bool) -> Self {
        if show_microseconds {
            TimestampFormat::Micros
        } else {
            TimestampFormat::Seconds
        }
    }

    /// Human-readable form used inside the `[...]` line prefix
    #[must_use]
    pub fn display(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Seconds => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Micros => datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        }
    }

    /// Form safe to embed in a file name on every platform (no `:` or spaces)
    #[must_use]
    pub fn file_safe(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Seconds => datetime.format("%Y-%m-%d_%H-%M-%S").to_string(),
            TimestampFormat::Micros => datetime.format("%Y-%m-%d_%H-%M-%S-%6f").to_string(),
        }
    }
}
