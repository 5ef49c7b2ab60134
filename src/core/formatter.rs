//! Record formatting
//!
//! Turns a [`LogRecord`] into the two strings the sinks consume: the console
//! form, which may carry ANSI color, and the file form, which never does.

use super::config::LoggerConfig;
use super::log_level::ANSI_RESET;
use super::log_record::LogRecord;
use std::fmt::Write;

/// Output of [`format`] for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    /// Console line, colored when `enable_color` is set
    pub display: String,
    /// File line, never colored; no trailing newline
    pub file: String,
}

/// Render `record` according to `config`.
///
/// Layout: `[timestamp] [file:line] <color>[LEVEL] message<reset>`, where the
/// timestamp prefix is present only with `enable_timestamp` and the color
/// codes only with `enable_color`.
///
/// # Examples
///
/// ```
/// use sapling::core::{formatter, LogLevel, LogRecord, LoggerConfig, SourceLocation};
/// use chrono::Local;
///
/// let config = LoggerConfig::new().with_timestamp(false).with_color(false);
/// let record = LogRecord::new(
///     LogLevel::Info,
///     "boot complete",
///     Local::now(),
///     SourceLocation::new("src/main.rs", 7),
/// );
/// let out = formatter::format(&record, &config);
/// assert_eq!(out.display, "[main.rs:7] [INFO] boot complete");
/// assert_eq!(out.display, out.file);
/// ```
pub fn format(record: &LogRecord, config: &LoggerConfig) -> FormattedRecord {
    let mut prefix = String::with_capacity(64);
    if config.enable_timestamp {
        let _ = write!(
            prefix,
            "[{}] ",
            config.timestamp_format().display(&record.timestamp)
        );
    }
    let _ = write!(prefix, "[{}] ", record.location);

    let body = format!("[{}] {}", record.level.to_str(), record.message);

    // Escapes carried in by the message never reach the file
    let file = strip_ansi(&format!("{}{}", prefix, body));
    let display = if config.enable_color {
        format!("{}{}{}{}", prefix, record.level.ansi_prefix(), body, ANSI_RESET)
    } else {
        file.clone()
    };

    FormattedRecord { display, file }
}

/// Remove every ANSI control sequence (`ESC [ params final`) from `input`.
///
/// A lone or unterminated `ESC` is dropped by itself, so the result never
/// contains an escape byte.
///
/// ```
/// use sapling::core::formatter::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1b[0;31mred\x1b[0m plain"), "red plain");
/// assert_eq!(strip_ansi("cut \x1b[31"), "cut [31");
/// ```
pub fn strip_ansi(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut output = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESC {
            i += 1;
            continue;
        }
        output.push_str(&input[copied..i]);
        i += escape_len(&bytes[i..]);
        copied = i;
    }
    output.push_str(&input[copied..]);
    output
}

const ESC: u8 = 0x1b;

/// Length of the escape starting at `bytes[0]`: a complete CSI sequence, or 1.
fn escape_len(bytes: &[u8]) -> usize {
    if bytes.get(1) != Some(&b'[') {
        return 1;
    }
    let mut end = 2;
    while matches!(bytes.get(end), Some(0x30..=0x3f)) {
        end += 1;
    }
    while matches!(bytes.get(end), Some(0x20..=0x2f)) {
        end += 1;
    }
    match bytes.get(end) {
        Some(0x40..=0x7e) => end + 1,
        _ => 1,
    }
}
