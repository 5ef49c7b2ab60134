//! Rotation policy
//!
//! Decides when the active log file must be swapped for a new one and what the
//! new file is called. Two independent triggers exist, checked in order:
//!
//! 1. **Time**: `rotation_interval` is non-zero and the scheduled deadline has passed.
//! 2. **Size**: `max_file_size_kb` is non-zero and the file has reached it.
//!
//! At most one rotation is reported per check. Rotated files are named
//! `<name>.<timestamp>[_<seq>].<ext>`; the sequence suffix appears only when a
//! timestamp repeats, so rapid rotation never reuses a name. Old files are
//! never renamed, pruned or deleted.

use super::config::LoggerConfig;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which trigger fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationTrigger {
    Time,
    Size,
}

/// Bookkeeping for the currently open file, owned by the file sink.
#[derive(Debug, Clone, Default)]
pub struct RotationState {
    current_path: Option<PathBuf>,
    next_rotation: Option<DateTime<Local>>,
    last_stamp: Option<String>,
    sequence: u32,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the file currently being written, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn set_current_path(&mut self, path: PathBuf) {
        self.current_path = Some(path);
    }

    /// Next instant at which the time trigger fires.
    pub fn next_rotation(&self) -> Option<DateTime<Local>> {
        self.next_rotation
    }

    /// Current same-timestamp disambiguation counter.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Arm (or disarm) the time trigger relative to `now`.
    pub fn schedule(&mut self, now: DateTime<Local>, config: &LoggerConfig) {
        self.next_rotation = config
            .rotation_period()
            .and_then(|period| deadline_after(now, period));
    }

    /// Evaluate both triggers for a file currently `current_size` bytes long.
    ///
    /// A `None` size means the size could not be determined; only the time
    /// trigger is considered then. When the time trigger fires the deadline
    /// moves to `now + interval` right away, whether or not the swap that
    /// follows succeeds.
    pub fn rotation_trigger(
        &mut self,
        current_size: Option<u64>,
        now: DateTime<Local>,
        config: &LoggerConfig,
    ) -> Option<RotationTrigger> {
        match config.rotation_period() {
            Some(period) => match self.next_rotation {
                Some(deadline) if now >= deadline => {
                    self.next_rotation = deadline_after(now, period);
                    return Some(RotationTrigger::Time);
                }
                Some(_) => {}
                // Time rotation switched on after the file was opened
                None => self.next_rotation = deadline_after(now, period),
            },
            None => self.next_rotation = None,
        }

        match (config.max_file_size_bytes(), current_size) {
            (Some(max_bytes), Some(size)) if size >= max_bytes => Some(RotationTrigger::Size),
            _ => None,
        }
    }

    /// Boolean form of [`rotation_trigger`](Self::rotation_trigger).
    pub fn should_rotate(
        &mut self,
        current_size: Option<u64>,
        now: DateTime<Local>,
        config: &LoggerConfig,
    ) -> bool {
        self.rotation_trigger(current_size, now, config).is_some()
    }

    /// Generate the next rotated file name (relative to the log directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use sapling::core::{LoggerConfig, RotationState};
    /// use chrono::{Local, TimeZone};
    ///
    /// let config = LoggerConfig::new().with_file_rotation(true);
    /// let now = Local.with_ymd_and_hms(2025, 6, 8, 10, 30, 45).unwrap();
    /// let mut state = RotationState::new();
    ///
    /// assert_eq!(state.next_file_name(now, &config), "sapling.2025-06-08_10-30-45.log");
    /// assert_eq!(state.next_file_name(now, &config), "sapling.2025-06-08_10-30-45_1.log");
    /// assert_eq!(state.next_file_name(now, &config), "sapling.2025-06-08_10-30-45_2.log");
    /// ```
    pub fn next_file_name(&mut self, now: DateTime<Local>, config: &LoggerConfig) -> String {
        let stamp = config.timestamp_format().file_safe(&now);

        if self.last_stamp.as_deref() == Some(stamp.as_str()) {
            self.sequence += 1;
        } else {
            self.sequence = 0;
            self.last_stamp = Some(stamp.clone());
        }

        if self.sequence == 0 {
            config.file_name(Some(&stamp))
        } else {
            config.file_name(Some(&format!("{}_{}", stamp, self.sequence)))
        }
    }
}

fn deadline_after(now: DateTime<Local>, period: Duration) -> Option<DateTime<Local>> {
    chrono::Duration::from_std(period)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
}
