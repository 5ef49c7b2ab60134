//! File logging example
//!
//! Demonstrates logging to console and a size-rotated log file simultaneously.
//!
//! Run with: cargo run --example file_logging

use sapling::prelude::*;

fn main() -> Result<()> {
    println!("=== Sapling - File Logging Example ===\n");

    let logger = Logger::new(
        LoggerConfig::new()
            .with_log_name("application")
            .with_directory("demo_logs")
            .with_file_rotation(true)
            .with_max_file_size_kb(1)
            .with_console_level(LogLevel::Info),
    );

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration... (file only)");
    logger.warning("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Writing enough to trigger rotation:");
    for i in 1..=40 {
        logger.info(format!("Processing item {}/40", i));
    }

    logger.flush()?;

    let metrics = logger.metrics();
    println!("\n=== Example completed successfully! ===");
    println!(
        "Wrote {} lines ({} bytes) across {} rotation(s); active file: {:?}",
        metrics.file_written(),
        metrics.bytes_written(),
        metrics.rotations(),
        logger.current_file()
    );

    Ok(())
}
