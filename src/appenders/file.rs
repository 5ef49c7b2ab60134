//! File sink with rotation
//!
//! Owns the open log file and its [`RotationState`]. Files are opened in
//! append mode and never truncated; every line is flushed before `append`
//! returns. Rotation opens a new, distinctly named file and only then releases
//! the old one, which stays on disk under its original name.

use crate::core::config::LoggerConfig;
use crate::core::error::{LoggerError, Result};
use crate::core::rotation::{RotationState, RotationTrigger};
use chrono::{DateTime, Local};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Attempts at finding a rotated name not already present on disk
const MAX_NAME_ATTEMPTS: usize = 1000;

pub struct FileSink {
    directory: PathBuf,
    writer: Option<BufWriter<File>>,
    /// `None` when the size of the open file could not be determined
    current_size: Option<u64>,
    state: RotationState,
}

impl FileSink {
    /// Create the log directory and open the first file for `config`.
    ///
    /// Without rotation the file is `<dir>/<name>.<ext>`; with rotation it is
    /// stamped with `now` like every later file.
    ///
    /// # Errors
    ///
    /// Returns error if file logging is disabled in `config`, the directory
    /// cannot be created, or the file cannot be opened or locked
    pub fn open_for(config: &LoggerConfig, now: DateTime<Local>) -> Result<Self> {
        let target = config
            .file_target()
            .ok_or_else(|| LoggerError::config("FileSink", "file logging is disabled"))?;

        fs::create_dir_all(target.directory()).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", target.directory().display()),
                e,
            )
        })?;

        let mut state = RotationState::new();
        let path = if target.rotating {
            Self::unused_path(target.directory(), &mut state, now, config)?
        } else {
            target.directory().join(target.plain_file_name())
        };

        let (file, current_size) = Self::open(&path)?;
        state.set_current_path(path);
        state.schedule(now, config);

        Ok(Self {
            directory: target.directory,
            writer: Some(BufWriter::new(file)),
            current_size,
            state,
        })
    }

    /// Open `path` for appending and take an exclusive lock on it.
    ///
    /// Also returns the file's current length, if it can be read.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or another writer holds its lock
    pub fn open(path: &Path) -> Result<(File, Option<u64>)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                return Err(LoggerError::file_lock(path.display().to_string()));
            }
            // Filesystems without advisory locks still get a working log
        }

        let current_size = file.metadata().map(|m| m.len()).ok();
        Ok((file, current_size))
    }

    /// Append `line` plus a newline and flush. Returns the bytes written.
    ///
    /// # Errors
    ///
    /// Returns error if the sink is closed or the write fails
    pub fn append(&mut self, line: &str) -> Result<u64> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut output = String::with_capacity(line.len() + 1);
        output.push_str(line);
        output.push('\n');

        let written = writer.write_all(output.as_bytes()).and_then(|()| writer.flush());
        if let Err(e) = written {
            // Discard the unflushed remainder so a failed line never lands later
            if let Some(writer) = self.writer.take() {
                let (file, _unflushed) = writer.into_parts();
                self.writer = Some(BufWriter::new(file));
            }
            return Err(LoggerError::file_appender(
                self.path_string(),
                format!("Failed to write log entry: {}", e),
            ));
        }

        let bytes_written = output.len() as u64;
        if let Some(size) = self.current_size.as_mut() {
            *size += bytes_written;
        }
        Ok(bytes_written)
    }

    /// Swap to a new file if a rotation trigger fires.
    ///
    /// On a failed swap the current file stays open and its size counter is
    /// reset, so writing continues and the size trigger does not fire again
    /// until another full file's worth of data has been written.
    ///
    /// # Errors
    ///
    /// Returns error if a trigger fired but the new file could not be opened
    pub fn rotate_if_needed(
        &mut self,
        now: DateTime<Local>,
        config: &LoggerConfig,
    ) -> Result<Option<RotationTrigger>> {
        let Some(trigger) = self.state.rotation_trigger(self.current_size, now, config) else {
            return Ok(None);
        };

        let swapped = Self::unused_path(&self.directory, &mut self.state, now, config)
            .and_then(|new_path| self.rotate_to(new_path));
        if let Err(e) = swapped {
            self.current_size = Some(0);
            return Err(e);
        }
        Ok(Some(trigger))
    }

    /// Re-arm the time trigger after the rotation interval changed.
    pub fn reschedule(&mut self, now: DateTime<Local>, config: &LoggerConfig) {
        self.state.schedule(now, config);
    }

    /// Open `new_path`, then flush and release the current file.
    ///
    /// # Errors
    ///
    /// Returns error if `new_path` cannot be opened; the current file is kept
    pub fn rotate_to(&mut self, new_path: PathBuf) -> Result<()> {
        let (file, current_size) = Self::open(&new_path).map_err(|e| {
            LoggerError::file_rotation(
                new_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;

        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                eprintln!(
                    "[SAPLING WARN] Failed to flush {} before rotation: {}",
                    self.path_string(),
                    e
                );
            }
            // Old handle dropped here, releasing its lock
        }

        self.writer = Some(BufWriter::new(file));
        self.current_size = current_size;
        self.state.set_current_path(new_path);
        Ok(())
    }

    /// Flush and release the file. Further appends fail until reopened.
    ///
    /// # Errors
    ///
    /// Returns error if the final flush fails
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(self.path_string(), format!("Failed to flush: {}", e))
            })?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Path of the file currently being written
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.state.current_path()
    }

    /// Bytes in the current file, as far as the sink knows
    #[must_use]
    pub fn current_size(&self) -> Option<u64> {
        self.current_size
    }

    #[must_use]
    pub fn rotation_state(&self) -> &RotationState {
        &self.state
    }

    /// Next rotated name in `directory` that does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns error if every candidate within `MAX_NAME_ATTEMPTS` is taken
    fn unused_path(
        directory: &Path,
        state: &mut RotationState,
        now: DateTime<Local>,
        config: &LoggerConfig,
    ) -> Result<PathBuf> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = directory.join(state.next_file_name(now, config));
            if !path.exists() {
                return Ok(path);
            }
        }
        Err(LoggerError::file_rotation(
            directory.display().to_string(),
            format!("No unused log file name after {} attempts", MAX_NAME_ATTEMPTS),
        ))
    }

    fn path_string(&self) -> String {
        self.path()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Best effort flush - ignore errors during drop
        let _ = self.close();
    }
}
