//! # Sapling
//!
//! A lightweight, embeddable logging facility for single-process applications.
//!
//! ## Features
//!
//! - **Leveled, colored console output**: `[time] [file:line] [LEVEL] message`
//! - **Plain-text log files**: the same line without color codes, flushed per record
//! - **Rotation**: by size and/or time, into uniquely named timestamped files
//! - **Thread safe**: every call is fully serialized behind one lock
//! - **Live reconfiguration**: swap the configuration without restarting
//!
//! ```no_run
//! use sapling::prelude::*;
//!
//! let logger = Logger::new(LoggerConfig::new().with_directory("logs"));
//! logger.info("boot complete");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileSink, MemoryConsole};
    pub use crate::core::{
        Clock, ConsoleSink, FileState, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, ManualClock, Result, SourceLocation, SystemClock,
    };
}

pub use self::appenders::{ConsoleAppender, FileSink, MemoryConsole};
pub use self::core::{
    Clock, ConsoleSink, FileState, FileTarget, FormattedRecord, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, ManualClock, Result, RotationState,
    RotationTrigger, SourceLocation, SystemClock, TimestampFormat,
};
