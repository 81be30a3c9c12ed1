//! The allocator and its two-tier compaction strategy.
//!
//! Services a commit of `n` bytes against a [`SegmentIndex`], escalating
//! through first-fit, tier-1 coalescing, and tier-2 relocation in that
//! order, per spec.md §4.3. Zero-length commits never reach this module —
//! [`crate::pool::Pool::commit`] handles that special case directly.

use crate::arena::Arena;
use crate::error::OutOfSpace;
use crate::segment::SegmentIndex;

/// Which compaction tiers fired while servicing a commit, for stats
/// accounting in the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CompactionPath {
    /// Served by the first-fit fast path; no compaction ran.
    Fast,
    /// Tier-1 coalescing ran (successfully or not) before a fit was found.
    Tier1,
    /// Both tiers ran before a fit was found.
    Tier1AndTier2,
}

/// Find or manufacture a free run of `n` bytes and take it.
///
/// Returns the chosen start offset and which tiers fired. Does not write
/// payload bytes — the caller copies `data` into the returned range and
/// records the used segment.
pub(crate) fn allocate(
    arena: &mut Arena,
    index: &mut SegmentIndex,
    n: usize,
) -> Result<(usize, CompactionPath), OutOfSpace> {
    if let Some(i) = index.find_free_fit(n) {
        return Ok((index.take(i, n), CompactionPath::Fast));
    }

    // Cheap upper bound: if the free total can't cover `n`, no amount of
    // compaction can help.
    let free_total = index.free_total();
    if free_total < n {
        return Err(OutOfSpace {
            requested: n,
            available: free_total,
        });
    }

    index.coalesce_free();
    if let Some(i) = index.find_free_fit(n) {
        return Ok((index.take(i, n), CompactionPath::Tier1));
    }

    relocate(arena, index);
    match index.find_free_fit(n) {
        Some(i) => Ok((index.take(i, n), CompactionPath::Tier1AndTier2)),
        None => Err(OutOfSpace {
            requested: n,
            available: index.free_total(),
        }),
    }
}

/// Tier-2 compaction: pack every live payload to the low end of the arena
/// in ascending order of current `start`, coalescing all free space into
/// one run at the high end.
///
/// Preserves the relative order of payloads in the arena and never
/// changes a handle's identity — only its recorded `start`.
fn relocate(arena: &mut Arena, index: &mut SegmentIndex) {
    let snapshot = index.used_snapshot_by_start();
    let mut cursor = 0usize;
    for (handle, start, length) in snapshot {
        if length == 0 {
            continue;
        }
        if start != cursor {
            arena.copy_within(start, cursor, length);
            index.relocate_used(handle, cursor);
        }
        cursor += length;
    }
    let capacity = arena.capacity();
    index.set_single_free_run(cursor, capacity - cursor);
}
