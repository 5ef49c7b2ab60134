//! Stress tests for serialized logging
//!
//! These tests verify:
//! - Concurrent callers never produce torn or interleaved lines
//! - Line counts match the number of calls that passed the file filter
//! - Rotation under concurrent load loses and duplicates nothing
//! - Reconfiguration racing with logging stays consistent

use sapling::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn quiet_config(dir: &Path) -> LoggerConfig {
    LoggerConfig::new()
        .with_directory(dir)
        .with_console(false)
}

fn read_all_lines(dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read log dir") {
        let path = entry.expect("dir entry").path();
        let content = fs::read_to_string(&path).expect("Failed to read log file");
        assert!(content.is_empty() || content.ends_with('\n'), "torn tail in {}", path.display());
        lines.extend(content.lines().map(String::from));
    }
    lines
}

fn hammer(logger: &Arc<Logger>, levels: &[LogLevel]) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            let levels = levels.to_vec();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let level = levels[i % levels.len()];
                    logger.log(format!("worker-{}-msg-{}-end", t, i), level);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}

fn assert_well_formed(line: &str) {
    assert!(line.starts_with('['), "bad start: {}", line);
    assert!(line.ends_with("-end"), "torn line: {}", line);
    assert_eq!(line.matches("worker-").count(), 1, "interleaved line: {}", line);
}

/// Every call lands as exactly one complete line
#[test]
fn test_concurrent_lines_are_whole() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(Logger::new(quiet_config(temp_dir.path())));

    hammer(&logger, &[LogLevel::Info]);
    logger.flush().expect("Failed to flush");

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in &lines {
        assert_well_formed(line);
    }

    let unique: HashSet<&String> = lines.iter().collect();
    assert_eq!(unique.len(), lines.len());
}

/// Only records passing the file filter are counted
#[test]
fn test_concurrent_filtered_count() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(Logger::new(
        quiet_config(temp_dir.path()).with_file_level(LogLevel::Warning),
    ));

    let levels = [LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error];
    hammer(&logger, &levels);

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), THREADS * PER_THREAD / 2);
    assert!(lines
        .iter()
        .all(|l| l.contains("[WARNING]") || l.contains("[ERROR]")));
    assert_eq!(logger.metrics().file_written() as usize, lines.len());
    assert_eq!(logger.metrics().filtered() as usize, THREADS * PER_THREAD / 2);
}

/// Rapid size rotation from many threads keeps every message exactly once
#[test]
fn test_concurrent_rotation_no_loss() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(Logger::new(
        quiet_config(temp_dir.path())
            .with_file_rotation(true)
            .with_max_file_size_kb(8),
    ));

    hammer(&logger, &[LogLevel::Info]);
    logger.flush().expect("Failed to flush");

    let lines = read_all_lines(temp_dir.path());
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    let unique: HashSet<&String> = lines.iter().collect();
    assert_eq!(unique.len(), lines.len());

    let files = fs::read_dir(temp_dir.path()).unwrap().count();
    assert!(files > 1);
    assert_eq!(logger.metrics().rotations() as usize, files - 1);
    assert_eq!(logger.metrics().write_failures(), 0);
}

/// Reconfiguration between two directories while other threads log
#[test]
fn test_reconfigure_under_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir_a = temp_dir.path().join("a");
    let dir_b = temp_dir.path().join("b");
    let logger = Arc::new(Logger::new(quiet_config(&dir_a)));

    let switcher = {
        let logger = Arc::clone(&logger);
        let (dir_a, dir_b) = (dir_a.clone(), dir_b.clone());
        thread::spawn(move || {
            for i in 0..50 {
                let dir = if i % 2 == 0 { &dir_b } else { &dir_a };
                logger.update_config(quiet_config(dir));
                thread::yield_now();
            }
        })
    };

    hammer(&logger, &[LogLevel::Info]);
    switcher.join().expect("Thread panicked");

    let mut lines = read_all_lines(&dir_a);
    lines.extend(read_all_lines(&dir_b));
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in &lines {
        assert_well_formed(line);
    }
    assert_eq!(logger.file_state(), FileState::Active);
}
