//! Logger configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a [`Logger`](crate::Logger) needs to know about its sinks.
///
/// # Examples
///
/// ```
/// use sapling::{LogLevel, LoggerConfig};
/// use std::time::Duration;
///
/// let config = LoggerConfig::new()
///     .with_log_name("server")
///     .with_directory("logs")
///     .with_file_rotation(true)
///     .with_max_file_size_kb(1024)
///     .with_rotation_interval(Duration::from_secs(3600))
///     .with_file_level(LogLevel::Info);
///
/// assert_eq!(config.max_file_size_bytes(), Some(1024 * 1024));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_name: String,
    pub log_file_directory: PathBuf,
    pub log_file_extension: String,
    pub enable_file_logging: bool,
    pub enable_console: bool,
    pub enable_color: bool,
    pub enable_timestamp: bool,
    pub show_microseconds: bool,
    pub enable_file_rotation: bool,
    /// Size trigger in KiB; 0 disables it
    pub max_file_size_kb: u64,
    /// Time trigger; zero disables it
    pub rotation_interval: Duration,
    pub console_log_level: LogLevel,
    pub file_log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_name: "sapling".to_string(),
            log_file_directory: PathBuf::from("."),
            log_file_extension: "log".to_string(),
            enable_file_logging: true,
            enable_console: true,
            enable_color: true,
            enable_timestamp: true,
            show_microseconds: false,
            enable_file_rotation: false,
            max_file_size_kb: 5120, // 5 MB
            rotation_interval: Duration::ZERO,
            console_log_level: LogLevel::Debug,
            file_log_level: LogLevel::Debug,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot name a file at all.
    pub fn validate(&self) -> Result<()> {
        if self.enable_file_logging && self.log_name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "log_name must not be empty"));
        }
        if self.log_name.contains(['/', '\\']) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("log_name '{}' must not contain path separators", self.log_name),
            ));
        }
        Ok(())
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_log_name(mut self, name: impl Into<String>) -> Self {
        self.log_name = name.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.log_file_directory = directory.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.log_file_extension = extension.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_logging(mut self, enabled: bool) -> Self {
        self.enable_file_logging = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.enable_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.enable_color = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.enable_timestamp = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_microseconds(mut self, enabled: bool) -> Self {
        self.show_microseconds = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_rotation(mut self, enabled: bool) -> Self {
        self.enable_file_rotation = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_file_size_kb(mut self, kb: u64) -> Self {
        self.max_file_size_kb = kb;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation_interval = interval;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console_level(mut self, level: LogLevel) -> Self {
        self.console_log_level = level;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_level(mut self, level: LogLevel) -> Self {
        self.file_log_level = level;
        self
    }

    /// Size threshold in bytes, `None` when the size trigger is inert.
    #[must_use]
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        if self.enable_file_rotation && self.max_file_size_kb > 0 {
            Some(self.max_file_size_kb.saturating_mul(1024))
        } else {
            None
        }
    }

    /// Rotation period, `None` when the time trigger is inert.
    #[must_use]
    pub fn rotation_period(&self) -> Option<Duration> {
        if self.enable_file_rotation && !self.rotation_interval.is_zero() {
            Some(self.rotation_interval)
        } else {
            None
        }
    }

    #[must_use]
    pub fn timestamp_format(&self) -> TimestampFormat {
        TimestampFormat::from_micros_flag(self.show_microseconds)
    }

    /// File name for this config's log, optionally stamped
    #[must_use]
    pub fn file_name(&self, stamp: Option<&str>) -> String {
        compose_file_name(&self.log_name, stamp, &self.log_file_extension)
    }

    /// The file the logger should be writing to, `None` when file logging is off.
    #[must_use]
    pub fn file_target(&self) -> Option<FileTarget> {
        self.enable_file_logging.then(|| FileTarget {
            directory: self.log_file_directory.clone(),
            name: self.log_name.clone(),
            extension: self.log_file_extension.clone(),
            rotating: self.enable_file_rotation,
        })
    }
}

/// Identity of the file sink. Two configs with equal targets share the open handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub directory: PathBuf,
    pub name: String,
    pub extension: String,
    pub rotating: bool,
}

impl FileTarget {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<name>.<ext>`, the non-rotating file name
    pub fn plain_file_name(&self) -> String {
        self.file_name(None)
    }

    /// `<name>.<stamp>.<ext>`, or `<name>.<ext>` without a stamp
    pub fn file_name(&self, stamp: Option<&str>) -> String {
        compose_file_name(&self.name, stamp, &self.extension)
    }
}

/// Joins the name parts with dots; an empty extension is omitted.
pub(crate) fn compose_file_name(name: &str, stamp: Option<&str>, extension: &str) -> String {
    let mut file_name = name.to_string();
    if let Some(stamp) = stamp {
        file_name.push('.');
        file_name.push_str(stamp);
    }
    let extension = extension.trim_start_matches('.');
    if !extension.is_empty() {
        file_name.push('.');
        file_name.push_str(extension);
    }
    file_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.log_name, "sapling");
        assert_eq!(config.log_file_directory, PathBuf::from("."));
        assert_eq!(config.log_file_extension, "log");
        assert!(config.enable_file_logging);
        assert!(config.enable_console);
        assert!(config.enable_color);
        assert!(config.enable_timestamp);
        assert!(!config.show_microseconds);
        assert!(!config.enable_file_rotation);
        assert_eq!(config.console_log_level, LogLevel::Debug);
        assert_eq!(config.file_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_triggers_require_rotation_flag() {
        let config = LoggerConfig::new()
            .with_max_file_size_kb(1)
            .with_rotation_interval(Duration::from_secs(60));
        assert_eq!(config.max_file_size_bytes(), None);
        assert_eq!(config.rotation_period(), None);

        let config = config.with_file_rotation(true);
        assert_eq!(config.max_file_size_bytes(), Some(1024));
        assert_eq!(config.rotation_period(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_limits_are_inert() {
        let config = LoggerConfig::new()
            .with_file_rotation(true)
            .with_max_file_size_kb(0)
            .with_rotation_interval(Duration::ZERO);
        assert_eq!(config.max_file_size_bytes(), None);
        assert_eq!(config.rotation_period(), None);
    }

    #[test]
    fn test_file_target() {
        assert!(LoggerConfig::new().with_file_logging(false).file_target().is_none());

        let target = LoggerConfig::new()
            .with_log_name("app")
            .with_extension(".txt")
            .file_target()
            .unwrap();
        assert_eq!(target.plain_file_name(), "app.txt");
        assert_eq!(target.file_name(Some("2025-01-01_00-00-00")), "app.2025-01-01_00-00-00.txt");

        let target = LoggerConfig::new().with_extension("").file_target().unwrap();
        assert_eq!(target.plain_file_name(), "sapling");
    }

    #[test]
    fn test_level_change_keeps_target() {
        let a = LoggerConfig::new();
        let b = a.clone().with_file_level(LogLevel::Error).with_color(false);
        assert_eq!(a.file_target(), b.file_target());

        let c = a.clone().with_directory("elsewhere");
        assert_ne!(a.file_target(), c.file_target());
    }

    #[test]
    fn test_from_json_partial() {
        let config = LoggerConfig::from_json(
            r#"{ "log_name": "svc", "enable_file_rotation": true, "max_file_size_kb": 64,
                 "file_log_level": "Warning" }"#,
        )
        .unwrap();
        assert_eq!(config.log_name, "svc");
        assert_eq!(config.max_file_size_bytes(), Some(64 * 1024));
        assert_eq!(config.file_log_level, LogLevel::Warning);
        assert!(config.enable_console);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            LoggerConfig::from_json("{ not json"),
            Err(LoggerError::JsonError(_))
        ));
        assert!(matches!(
            LoggerConfig::from_json(r#"{ "log_name": "a/b" }"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
