//! Console sink implementations

use crate::core::{ConsoleSink, LogLevel, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Writes display lines to the process's standard streams.
///
/// `Error` records go to stderr, everything else to stdout.
#[derive(Debug)]
pub struct ConsoleAppender {
    errors_to_stderr: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            errors_to_stderr: true,
        }
    }

    /// Send every level to stdout.
    pub fn stdout_only() -> Self {
        Self {
            errors_to_stderr: false,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for ConsoleAppender {
    fn write_line(&mut self, level: LogLevel, line: &str) -> Result<()> {
        if self.errors_to_stderr && level == LogLevel::Error {
            writeln!(std::io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Keeps display lines in memory, for hosts that render log output themselves
/// and for tests. Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use sapling::prelude::*;
///
/// let console = MemoryConsole::new();
/// let logger = Logger::builder()
///     .config(LoggerConfig::new().with_file_logging(false).with_color(false))
///     .console(console.clone())
///     .build();
///
/// logger.info("hello");
/// assert!(console.lines()[0].ends_with("[INFO] hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ConsoleSink for MemoryConsole {
    fn write_line(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_console_shares_buffer() {
        let console = MemoryConsole::new();
        let mut writer = console.clone();

        writer.write_line(LogLevel::Info, "one").unwrap();
        writer.write_line(LogLevel::Error, "two").unwrap();

        assert_eq!(console.lines(), vec!["one", "two"]);
        console.clear();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_console_appender_no_panic() {
        let mut console = ConsoleAppender::new();
        for level in LogLevel::ALL {
            console.write_line(level, "console smoke test").unwrap();
        }
        console.flush().unwrap();
        assert_eq!(console.name(), "console");
    }
}
