//! Shared fixtures for `mempool-core` benchmarks.
//!
//! Provides pre-built pool states for benchmarking:
//!
//! - [`fresh_pool`]: an empty pool of a given capacity.
//! - [`fragmented_pool`]: a pool with alternating live/released payloads,
//!   forcing tier-1 coalescing on the next oversized commit.
//! - [`scattered_pool`]: a pool with every third payload released,
//!   leaving non-adjacent gaps that force tier-2 relocation.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mempool_core::{Pool, PoolConfig};
use mempool_test_utils::CounterHandleSource;

/// Build an empty pool of `capacity` bytes with a deterministic handle
/// source, so bench runs are reproducible across machines.
pub fn fresh_pool(capacity: i64) -> Pool {
    let config = PoolConfig::new(capacity).unwrap();
    Pool::new(config, CounterHandleSource::default()).unwrap()
}

/// Fill a pool with `count` payloads of `payload_len` bytes each, then
/// release the first two (which sit at adjacent offsets, having been
/// committed back to back), leaving one mergeable free run tier-1 can
/// coalesce.
///
/// `capacity` should equal `count * payload_len` exactly, so the arena
/// ends up fully committed and the only free bytes available afterward
/// come from the releases below — otherwise a leftover free run from
/// construction would satisfy the fast path and compaction would never
/// fire.
pub fn fragmented_pool(capacity: i64, count: usize, payload_len: usize) -> Pool {
    let pool = fresh_pool(capacity);
    let payload = vec![0xCDu8; payload_len];
    let handles: Vec<_> = (0..count).map(|_| pool.commit(&payload).unwrap()).collect();
    for handle in handles.into_iter().take(2) {
        pool.release(handle).unwrap();
    }
    pool
}

/// Fill a pool with `count` payloads and release every third one, leaving
/// gaps that tier-1 coalescing cannot merge away.
///
/// Same `capacity == count * payload_len` contract as [`fragmented_pool`].
pub fn scattered_pool(capacity: i64, count: usize, payload_len: usize) -> Pool {
    let pool = fresh_pool(capacity);
    let payload = vec![0xABu8; payload_len];
    let handles: Vec<_> = (0..count).map(|_| pool.commit(&payload).unwrap()).collect();
    for handle in handles.into_iter().step_by(3) {
        pool.release(handle).unwrap();
    }
    pool
}
