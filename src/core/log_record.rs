//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Where a log call was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Cow<'static, str>,
    pub line: u32,
    pub function: Option<Cow<'static, str>>,
}

impl SourceLocation {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            function: None,
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: impl Into<Cow<'static, str>>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Location of the caller, resolved through `#[track_caller]` chains.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    /// File name without any leading directories.
    pub fn file_name(&self) -> &str {
        basename(&self.file)
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}

/// Returns the part of `path` after the last `/` or `\`, whichever platform wrote it.
pub fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// A single log call, created per call and consumed immediately.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub location: SourceLocation,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one call always produces exactly one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp: DateTime<Local>,
        location: SourceLocation,
    ) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message),
            timestamp,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_separators() {
        assert_eq!(basename("src/bin/main.rs"), "main.rs");
        assert_eq!(basename(r"C:\work\app\main.rs"), "main.rs");
        assert_eq!(basename(r"mixed/dir\lib.rs"), "lib.rs");
        assert_eq!(basename("main.rs"), "main.rs");
        assert_eq!(basename("trailing/"), "");
    }

    #[test]
    fn test_caller_points_here() {
        let location = SourceLocation::caller();
        assert_eq!(location.file_name(), "log_record.rs");
        assert_eq!(location.line, line!() - 2);
    }

    #[test]
    fn test_message_is_single_line() {
        let record = LogRecord::new(
            LogLevel::Info,
            "first\nsecond\r\tthird",
            Local::now(),
            SourceLocation::new("main.rs", 1),
        );
        assert_eq!(record.message, "first\\nsecond\\r\\tthird");
    }

    #[test]
    fn test_location_display() {
        let location = SourceLocation::new("/app/src/main.rs", 42).with_function("main");
        assert_eq!(location.to_string(), "main.rs:42");
        assert_eq!(location.function.as_deref(), Some("main"));
    }
}
