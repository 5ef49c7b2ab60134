//! Console output destination

use super::{error::Result, log_level::LogLevel};

/// Where display lines go. The logger serializes calls into one sink, but
/// several loggers sharing one stream are not serialized against each other.
pub trait ConsoleSink: Send {
    fn write_line(&mut self, level: LogLevel, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
