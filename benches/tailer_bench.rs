//! Log reader benchmarks: full scans and backward tail reads.
//!
//! Automatic runs fire after every request or command, so the cost of
//! `read_tail` on a large file directly adds to request teardown time. It
//! must stay flat as the file grows.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `full` | Lines/s for a full scan of 1k, 10k and 100k line files |
//! | `tail` | Time to read the last 50 lines of the same files |
//! | `tail/chunk_size` | Tail read of a 100k line file at different chunk sizes |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench tailer_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;
use std::io::Write;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logdex_feeds::LogTailer;
use tempfile::TempDir;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Write `lines` log lines to a fresh file and keep its directory alive.
fn fixture(lines: usize) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create bench dir");
    let path = dir.path().join("app.log");
    let mut file = std::io::BufWriter::new(std::fs::File::create(&path).expect("create log"));
    for i in 0..lines {
        writeln!(
            file,
            "2024-01-15T10:{:02}:{:02}Z INFO request {i} completed in {}ms",
            (i / 60) % 60,
            i % 60,
            i % 500
        )
        .expect("write log line");
    }
    file.flush().expect("flush log");
    (dir, path)
}

// ---------------------------------------------------------------------------
// Full scan
// ---------------------------------------------------------------------------

fn full_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("full");
    group.sample_size(20);
    let tailer = LogTailer::new();

    for size in SIZES {
        let (_dir, path) = fixture(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("lines", size), &path, |b, path| {
            b.iter(|| {
                tailer
                    .read_full(black_box(path))
                    .expect("open fixture")
                    .filter_map(Result::ok)
                    .count()
            })
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Tail
// ---------------------------------------------------------------------------

fn tail_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tail");
    let tailer = LogTailer::new();

    for size in SIZES {
        let (_dir, path) = fixture(size);
        group.bench_with_input(BenchmarkId::new("last_50", size), &path, |b, path| {
            b.iter(|| black_box(tailer.read_tail(black_box(path), 50).expect("tail fixture")))
        });
    }

    group.finish();
}

fn tail_chunk_size_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tail/chunk_size");
    let (_dir, path) = fixture(100_000);

    for chunk_size in [512usize, 8 * 1024, 64 * 1024] {
        let tailer = LogTailer::new().with_chunk_size(chunk_size);
        group.bench_with_input(BenchmarkId::new("bytes", chunk_size), &path, |b, path| {
            b.iter(|| black_box(tailer.read_tail(black_box(path), 50).expect("tail fixture")))
        });
    }

    group.finish();
}

criterion_group!(benches, full_bench, tail_bench, tail_chunk_size_bench);
criterion_main!(benches);
