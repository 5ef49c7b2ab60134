//! Core logger types: records, levels, configuration, formatting, filtering and rotation

pub mod appender;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod rotation;
pub mod timestamp;

pub use appender::ConsoleSink;
pub use config::{FileTarget, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatter::FormattedRecord;
pub use log_level::{LogLevel, ANSI_RESET};
pub use log_record::{basename, LogRecord, SourceLocation};
pub use logger::{FileState, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use rotation::{RotationState, RotationTrigger};
pub use timestamp::{Clock, ManualClock, SystemClock, TimestampFormat};
