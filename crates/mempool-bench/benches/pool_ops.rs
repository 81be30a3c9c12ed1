//! Criterion micro-benchmarks for commit, read, release, and the two
//! compaction tiers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mempool_bench::{fragmented_pool, fresh_pool, scattered_pool};
use mempool_core::RandomHandleSource;

/// Benchmark: commit a small payload into an otherwise-empty pool.
fn bench_commit_fast_path(c: &mut Criterion) {
    let pool = fresh_pool(1 << 20);
    let payload = vec![0u8; 64];
    c.bench_function("commit_fast_path", |b| {
        b.iter(|| {
            let handle = pool.commit(&payload).unwrap();
            black_box(handle);
            pool.release(handle).unwrap();
        });
    });
}

/// Benchmark: read a live payload back out of the pool.
fn bench_read(c: &mut Criterion) {
    let pool = fresh_pool(1 << 16);
    let handle = pool.commit(&vec![0u8; 256]).unwrap();
    c.bench_function("read", |b| {
        b.iter(|| black_box(pool.read(handle).unwrap()));
    });
}

/// Benchmark: a commit that only needs tier-1 coalescing to succeed.
fn bench_commit_triggers_tier1(c: &mut Criterion) {
    c.bench_function("commit_triggers_tier1", |b| {
        b.iter(|| {
            let pool = fragmented_pool(2048, 64, 32);
            let handle = pool.commit(&vec![0u8; 48]).unwrap();
            black_box(handle);
        });
    });
}

/// Benchmark: a commit that forces tier-2 relocation over a scattered pool.
fn bench_commit_triggers_tier2(c: &mut Criterion) {
    c.bench_function("commit_triggers_tier2", |b| {
        b.iter(|| {
            let pool = scattered_pool(2048, 64, 32);
            let handle = pool.commit(&vec![0u8; 600]).unwrap();
            black_box(handle);
        });
    });
}

/// Benchmark: minting a handle with the production RNG-backed source.
fn bench_random_handle_source(c: &mut Criterion) {
    let mut source = RandomHandleSource::new();
    c.bench_function("random_handle_source", |b| {
        b.iter(|| black_box(mempool_core::HandleSource::next_handle(&mut source)));
    });
}

criterion_group!(
    benches,
    bench_commit_fast_path,
    bench_read,
    bench_commit_triggers_tier1,
    bench_commit_triggers_tier2,
    bench_random_handle_source,
);
criterion_main!(benches);
