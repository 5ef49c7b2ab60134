//! Main logger implementation

use super::{
    appender::ConsoleSink,
    config::LoggerConfig,
    error::Result,
    filter,
    formatter,
    log_level::LogLevel,
    log_record::{LogRecord, SourceLocation},
    metrics::LoggerMetrics,
    timestamp::{Clock, SystemClock},
};
use crate::appenders::{ConsoleAppender, FileSink};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

/// Observable state of a logger's file sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// File logging is switched off in the configuration
    Inactive,
    /// A file is open and receiving records
    Active,
    /// Opening the file failed; only the console receives records
    Disabled,
}

enum FileSlot {
    Inactive,
    Active(FileSink),
    Disabled,
}

impl FileSlot {
    fn state(&self) -> FileState {
        match self {
            FileSlot::Inactive => FileState::Inactive,
            FileSlot::Active(_) => FileState::Active,
            FileSlot::Disabled => FileState::Disabled,
        }
    }
}

struct Inner {
    config: LoggerConfig,
    console: Box<dyn ConsoleSink>,
    file: FileSlot,
}

/// Formats records and routes them to the console and a rotating log file.
///
/// Every call runs under one lock, so formatting, filtering, rotation and the
/// file write of one record never interleave with another call's.
///
/// # Example
///
/// ```no_run
/// use sapling::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::new(
///     LoggerConfig::new()
///         .with_directory("logs")
///         .with_file_rotation(true)
///         .with_max_file_size_kb(1024)
///         .with_rotation_interval(Duration::from_secs(3600)),
/// );
///
/// logger.info("boot complete");
/// logger.log("disk almost full", LogLevel::Warning);
/// ```
pub struct Logger {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    /// Metrics for observability (written, filtered, rotations, failures)
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger writing to stdout/stderr and, if enabled, a log file.
    ///
    /// Never fails: if the directory or file cannot be created the logger
    /// starts with file logging disabled and reports why on stderr.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    fn from_parts(config: LoggerConfig, console: Box<dyn ConsoleSink>, clock: Arc<dyn Clock>) -> Self {
        let file = Self::open_file_slot(&config, clock.as_ref());
        Self {
            inner: Mutex::new(Inner {
                config,
                console,
                file,
            }),
            clock,
            metrics: LoggerMetrics::new(),
        }
    }

    fn open_file_slot(config: &LoggerConfig, clock: &dyn Clock) -> FileSlot {
        if !config.enable_file_logging {
            return FileSlot::Inactive;
        }

        let opened = config
            .validate()
            .and_then(|()| FileSink::open_for(config, clock.now()));

        match opened {
            Ok(sink) => FileSlot::Active(sink),
            Err(e) => {
                eprintln!("[SAPLING WARN] File logging disabled: {}", e);
                FileSlot::Disabled
            }
        }
    }

    /// Log `message` at `level`, attributed to the caller's file and line.
    #[track_caller]
    pub fn log(&self, message: impl AsRef<str>, level: LogLevel) {
        self.log_at(message, level, SourceLocation::caller());
    }

    /// Log `message` at `level` with an explicit source location.
    pub fn log_at(&self, message: impl AsRef<str>, level: LogLevel, location: SourceLocation) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        self.metrics.record_logged();

        let console_open = inner.config.enable_console;
        let file_open = matches!(inner.file, FileSlot::Active(_));
        let to_console = console_open && filter::allows_console(level, &inner.config);
        let to_file = file_open && filter::allows_file(level, &inner.config);

        if !to_console && !to_file {
            if console_open || file_open {
                self.metrics.record_filtered();
            } else {
                self.metrics.record_unrouted();
            }
            return;
        }

        let now = self.clock.now();
        let record = LogRecord::new(level, message.as_ref(), now, location);
        let formatted = formatter::format(&record, &inner.config);

        if to_console {
            match inner.console.write_line(level, &formatted.display) {
                Ok(()) => {
                    self.metrics.record_console_write();
                }
                Err(e) => {
                    self.metrics.record_write_failure();
                    eprintln!("[SAPLING ERROR] Console sink '{}' failed: {}", inner.console.name(), e);
                }
            }
        }

        if !to_file {
            return;
        }
        let FileSlot::Active(sink) = &mut inner.file else {
            return;
        };

        match sink.rotate_if_needed(now, &inner.config) {
            Ok(Some(_)) => {
                self.metrics.record_rotation();
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("[SAPLING WARN] Log rotation failed: {}. Continuing with current file.", e);
            }
        }

        match sink.append(&formatted.file) {
            Ok(bytes) => {
                self.metrics.record_file_write(bytes);
            }
            Err(e) => {
                self.metrics.record_write_failure();
                eprintln!("[SAPLING ERROR] File write failed: {}", e);
            }
        }
    }

    /// Replace the configuration.
    ///
    /// If the file target (directory, name, extension or rotation mode)
    /// changed, the current file is closed and a new one opened; a failed
    /// open leaves the logger with file logging disabled. A successful open
    /// re-enables a previously disabled file sink.
    pub fn update_config(&self, new_config: LoggerConfig) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.config.file_target() != new_config.file_target() {
            if let FileSlot::Active(mut sink) = std::mem::replace(&mut inner.file, FileSlot::Inactive) {
                if let Err(e) = sink.close() {
                    eprintln!("[SAPLING WARN] Failed to close previous log file: {}", e);
                }
            }
            inner.file = Self::open_file_slot(&new_config, self.clock.as_ref());
        } else if inner.config.rotation_period() != new_config.rotation_period() {
            if let FileSlot::Active(sink) = &mut inner.file {
                sink.reschedule(self.clock.now(), &new_config);
            }
        }

        inner.config = new_config;
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.inner.lock().config.clone()
    }

    pub fn file_state(&self) -> FileState {
        self.inner.lock().file.state()
    }

    /// Path of the log file currently being written
    pub fn current_file(&self) -> Option<PathBuf> {
        match &self.inner.lock().file {
            FileSlot::Active(sink) => sink.path().map(|p| p.to_path_buf()),
            _ => None,
        }
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use sapling::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .config(LoggerConfig::new().with_file_logging(false))
    ///     .console(MemoryConsole::new())
    ///     .build();
    ///
    /// logger.info("counted");
    /// assert_eq!(logger.metrics().total_logged(), 1);
    /// assert_eq!(logger.metrics().console_written(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.console.flush()?;
        if let FileSlot::Active(sink) = &mut inner.file {
            sink.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Debug);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Info);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Warning);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(message, LogLevel::Error);
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use sapling::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .config(LoggerConfig::new().with_file_logging(false))
    ///     .console(ConsoleAppender::stdout_only())
    ///     .build();
    /// logger.debug("ready");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        let _ = inner.console.flush();
        if let FileSlot::Active(sink) = &mut inner.file {
            // Best effort flush - ignore errors during drop
            let _ = sink.close();
        }
    }
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Box<dyn ConsoleSink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            console: None,
            clock: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the stdout/stderr console with another sink
    #[must_use = "builder methods return a new value"]
    pub fn console<S: ConsoleSink + 'static>(mut self, console: S) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Drive timestamps and rotation deadlines from `clock`
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let console = self
            .console
            .unwrap_or_else(|| Box::new(ConsoleAppender::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Logger::from_parts(self.config, console, clock)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
