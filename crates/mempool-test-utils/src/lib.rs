//! Test doubles for `mempool-core`.
//!
//! Provides [`CounterHandleSource`], a deterministic [`HandleSource`] for
//! tests that want to assert on specific handle values rather than deal
//! with [`mempool_core::RandomHandleSource`]'s unpredictable output.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use mempool_core::{Handle, HandleSource};

/// Deterministic [`HandleSource`] backed by a monotonic counter.
///
/// Handle `n` (0-indexed) is always the `n`-th call's return value,
/// regardless of how many pools share the same process — counters are
/// per-instance, not global.
pub struct CounterHandleSource {
    next: u64,
}

impl CounterHandleSource {
    /// Create a source whose first handle has raw value `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for CounterHandleSource {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl HandleSource for CounterHandleSource {
    fn next_handle(&mut self) -> Handle {
        let raw = self.next;
        self.next += 1;
        Handle::from_raw(raw)
    }
}
