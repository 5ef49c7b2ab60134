//! Per-sink severity filtering

use super::config::LoggerConfig;
use super::log_level::LogLevel;

/// Whether a record at `level` reaches the console.
#[inline]
pub fn allows_console(level: LogLevel, config: &LoggerConfig) -> bool {
    level >= config.console_log_level
}

/// Whether a record at `level` reaches the log file.
#[inline]
pub fn allows_file(level: LogLevel, config: &LoggerConfig) -> bool {
    level >= config.file_log_level
}
