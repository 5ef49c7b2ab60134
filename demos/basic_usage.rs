//! Basic logger usage example
//!
//! Demonstrates console logging at every level and per-sink filtering.
//!
//! Run with: cargo run --example basic_usage

use sapling::prelude::*;
use sapling::{info, warning};

fn main() -> Result<()> {
    println!("=== Sapling - Basic Usage Example ===\n");

    let logger = Logger::new(LoggerConfig::new().with_file_logging(false));

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Raising the console threshold to WARNING:");
    logger.update_config(
        LoggerConfig::new()
            .with_file_logging(false)
            .with_console_level(LogLevel::Warning),
    );
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    warning!(logger, "Warning number {} (visible)", 1);

    println!("\n3. Without colors or timestamps:");
    logger.update_config(
        LoggerConfig::new()
            .with_file_logging(false)
            .with_color(false)
            .with_timestamp(false),
    );
    info!(logger, "Plain output for {} consumers", "log-scraping");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
