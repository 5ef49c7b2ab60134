//! Criterion benchmarks for sapling

use chrono::Local;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sapling::core::{filter, formatter};
use sapling::prelude::*;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let record = LogRecord::new(
        LogLevel::Info,
        "Request handled in 42ms",
        Local::now(),
        SourceLocation::new("src/server/handler.rs", 120),
    );

    let colored = LoggerConfig::new();
    group.bench_function("colored", |b| {
        b.iter(|| black_box(formatter::format(black_box(&record), &colored)));
    });

    let plain = LoggerConfig::new().with_color(false).with_timestamp(false);
    group.bench_function("plain", |b| {
        b.iter(|| black_box(formatter::format(black_box(&record), &plain)));
    });

    group.bench_function("filter", |b| {
        b.iter(|| black_box(filter::allows_file(black_box(LogLevel::Debug), &colored)));
    });

    group.finish();
}

// ============================================================================
// File Logging Benchmarks
// ============================================================================

fn bench_file_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_logging");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Logger::new(
        LoggerConfig::new()
            .with_directory(temp_dir.path().join("plain"))
            .with_console(false),
    );
    group.bench_function("append", |b| {
        b.iter(|| logger.info(black_box("Benchmark message")));
    });

    let rotating = Logger::new(
        LoggerConfig::new()
            .with_directory(temp_dir.path().join("rotating"))
            .with_console(false)
            .with_file_rotation(true)
            .with_max_file_size_kb(256),
    );
    group.bench_function("append_with_rotation", |b| {
        b.iter(|| rotating.info(black_box("Benchmark message")));
    });

    let filtered = Logger::new(
        LoggerConfig::new()
            .with_directory(temp_dir.path().join("filtered"))
            .with_console(false)
            .with_file_level(LogLevel::Error),
    );
    group.bench_function("filtered_out", |b| {
        b.iter(|| filtered.debug(black_box("Never written")));
    });

    group.finish();
}

// ============================================================================
// Contention Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let logger = Arc::new(Logger::new(
                LoggerConfig::new()
                    .with_directory(temp_dir.path())
                    .with_console(false),
            ));

            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..100 {
                                logger.info(format!("Message {}", i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_formatting,
    bench_file_logging,
    bench_concurrent_logging
);
criterion_main!(benches);
