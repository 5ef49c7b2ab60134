//! Sink implementations

pub mod console;
pub mod file;

pub use console::{ConsoleAppender, MemoryConsole};
pub use file::FileSink;

// Re-export the console seam alongside its implementations
pub use crate::core::ConsoleSink;
