//! The public [`Pool`] type: commit/read/release over a fixed-capacity
//! arena, guarded by a single mutex.

use std::sync::Mutex;

use crate::arena::Arena;
use crate::compactor::{self, CompactionPath};
use crate::config::PoolConfig;
use crate::error::{InvalidHandle, OutOfSpace, PoolCreationError};
use crate::handle::{Handle, HandleSource};
use crate::segment::SegmentIndex;
use crate::stats::{Counters, PoolStats};

struct PoolInner {
    arena: Arena,
    index: SegmentIndex,
    counters: Counters,
    handles: Box<dyn HandleSource>,
}

/// A fixed-capacity, byte-addressable memory pool.
///
/// Stores opaque binary payloads inside a single pre-allocated arena and
/// returns opaque [`Handle`]s by which payloads are later read back or
/// released. All mutating operations (`commit`, `release`) and `read`
/// share a single [`std::sync::Mutex`] covering the full operation,
/// including any compaction a commit triggers — see spec.md §5.
///
/// The pool is in-memory only and non-persistent: dropping it releases the
/// arena, and nothing it stores survives a process restart.
pub struct Pool {
    capacity: usize,
    name: String,
    inner: Mutex<PoolInner>,
}

impl Pool {
    /// Construct a new pool from a validated [`PoolConfig`] and an
    /// injected [`HandleSource`].
    ///
    /// Fails with [`PoolCreationError::OutOfMemory`] if the backing
    /// `capacity`-byte buffer cannot be reserved. `config`'s own
    /// validation already rules out non-positive capacities.
    pub fn new(
        config: PoolConfig,
        handles: impl HandleSource + 'static,
    ) -> Result<Self, PoolCreationError> {
        let capacity = config.capacity();
        let arena = Arena::new(capacity).ok_or(PoolCreationError::OutOfMemory {
            requested: capacity,
        })?;
        let index = SegmentIndex::new(capacity);
        Ok(Self {
            capacity,
            name: config.name().to_string(),
            inner: Mutex::new(PoolInner {
                arena,
                index,
                counters: Counters::default(),
                handles: Box::new(handles),
            }),
        })
    }

    /// The pool's fixed capacity in bytes.
    pub fn size(&self) -> usize {
        self.capacity
    }

    /// The pool's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Commit `data` into the pool, returning a fresh handle.
    ///
    /// A commit of an empty slice is a special case (spec.md §4.3): it
    /// consumes no arena bytes, always succeeds, and is still serviced
    /// under the lock (the safer placement spec.md §9's Open Question
    /// calls for, rather than the lock-free shortcut the original design
    /// took).
    ///
    /// On failure the pool state is unchanged and `failed_commits` is
    /// incremented; on success, `commits` is incremented and, if
    /// compaction fired, `l1_compaction`/`l2_compaction` are incremented
    /// to reflect which tiers ran.
    pub fn commit(&self, data: &[u8]) -> Result<Handle, OutOfSpace> {
        let mut inner = self.inner.lock().unwrap();

        if data.is_empty() {
            let handle = inner.handles.next_handle();
            inner.index.record_used(handle, 0, 0);
            inner.counters.commits += 1;
            return Ok(handle);
        }

        let inner = &mut *inner;
        match compactor::allocate(&mut inner.arena, &mut inner.index, data.len()) {
            Ok((start, path)) => {
                match path {
                    CompactionPath::Fast => {}
                    CompactionPath::Tier1 => inner.counters.l1_compaction += 1,
                    CompactionPath::Tier1AndTier2 => {
                        inner.counters.l1_compaction += 1;
                        inner.counters.l2_compaction += 1;
                    }
                }
                inner.arena.write_at(start, data);
                let handle = inner.handles.next_handle();
                inner.index.record_used(handle, start, data.len());
                inner.counters.commits += 1;
                Ok(handle)
            }
            Err(err) => {
                inner.counters.failed_commits += 1;
                Err(err)
            }
        }
    }

    /// Read back a copy of the payload stored under `handle`.
    ///
    /// Always returns a fresh copy, never a view into the arena, so that
    /// a later compaction (which may relocate bytes) cannot invalidate
    /// data the caller already holds.
    pub fn read(&self, handle: Handle) -> Result<Vec<u8>, InvalidHandle> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.read_locks += 1;
        match inner.index.locate(handle) {
            Some((start, length)) => {
                inner.counters.reads += 1;
                Ok(inner.arena.read_at(start, length))
            }
            None => Err(InvalidHandle { handle }),
        }
    }

    /// Release the payload stored under `handle`.
    ///
    /// The freed range is appended to the free sequence unsorted; merging
    /// is deferred to tier-1 compaction, keeping `release` O(1).
    pub fn release(&self, handle: Handle) -> Result<(), InvalidHandle> {
        let mut inner = self.inner.lock().unwrap();
        match inner.index.drop_used(handle) {
            Some((start, length)) => {
                inner.index.release_to_free(start, length);
                inner.counters.releases += 1;
                Ok(())
            }
            None => Err(InvalidHandle { handle }),
        }
    }

    /// Sum of all free-segment lengths.
    ///
    /// spec.md §4.4 permits an unlocked, possibly-stale read here; Rust's
    /// ownership model makes an unsynchronized read of data behind a
    /// `Mutex` impossible to express safely, so this still takes the
    /// lock — the cheapest operation the pool performs, and one that
    /// never triggers compaction.
    pub fn available_space(&self) -> usize {
        self.inner.lock().unwrap().index.free_total()
    }

    /// Snapshot of the pool's observable counters.
    pub fn stats(&self) -> PoolStats {
        let inner = self.inner.lock().unwrap();
        PoolStats {
            size: self.capacity,
            name: self.name.clone(),
            commits: inner.counters.commits,
            failed_commits: inner.counters.failed_commits,
            reads: inner.counters.reads,
            read_locks: inner.counters.read_locks,
            l1_compaction: inner.counters.l1_compaction,
            l2_compaction: inner.counters.l2_compaction,
            releases: inner.counters.releases,
        }
    }
}
