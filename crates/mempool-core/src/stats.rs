//! Observable pool statistics.
//!
//! Counters are monotonically increasing and updated only while the pool's
//! mutex is held. [`PoolStats`] is a plain-data snapshot cloned out from
//! under the lock, so a single call never observes a torn read, though two
//! separate calls are not synchronized with each other beyond that.

/// Mutable counters, private to the pool's locked inner state.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Counters {
    pub commits: u64,
    pub failed_commits: u64,
    pub reads: u64,
    pub read_locks: u64,
    pub l1_compaction: u64,
    pub l2_compaction: u64,
    pub releases: u64,
}

/// Read-only snapshot of a pool's statistics, as returned by
/// [`crate::Pool::stats`].
///
/// `read_locks` counts lock acquisitions attributable to read operations;
/// `reads` counts reads that completed successfully. `read` acquires the
/// lock unconditionally before validating the handle, so the two diverge
/// exactly when `read` is called with a handle that turns out not to be
/// live: `read_locks` still increments, `reads` does not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolStats {
    /// The pool's fixed capacity in bytes.
    pub size: usize,
    /// The pool's diagnostic name.
    pub name: String,
    /// Total successful commits, including zero-length commits.
    pub commits: u64,
    /// Total commits that failed with [`crate::OutOfSpace`].
    pub failed_commits: u64,
    /// Total successful reads.
    pub reads: u64,
    /// Total lock acquisitions attributable to read operations.
    pub read_locks: u64,
    /// Total tier-1 (coalesce) compactions performed.
    pub l1_compaction: u64,
    /// Total tier-2 (relocate) compactions performed.
    pub l2_compaction: u64,
    /// Total successful releases.
    pub releases: u64,
}
