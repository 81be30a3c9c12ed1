//! Free and used segment bookkeeping.
//!
//! [`SegmentIndex`] tracks which byte ranges of the arena are free and
//! which are bound to a live handle. It never touches arena bytes; the
//! allocator ([`crate::compactor`]) and [`crate::Pool`] are the only
//! callers, and only they decide when and what bytes actually move.

use indexmap::IndexMap;

use crate::handle::Handle;

/// A half-open byte range `[start, start + length)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Segment {
    pub start: usize,
    pub length: usize,
}

impl Segment {
    pub(crate) fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Tracks the free sequence and the handle-keyed used map for one arena.
pub(crate) struct SegmentIndex {
    /// Disjoint free ranges. Not required to be ordered by `start` between
    /// compactions; `take` appends remainders at the end and `release`
    /// appends at the end, so this drifts out of order during normal use.
    free: Vec<Segment>,
    /// Handle-keyed live allocations.
    used: IndexMap<Handle, Segment>,
}

impl SegmentIndex {
    /// Build an index for a freshly constructed arena of `capacity` bytes.
    pub(crate) fn new(capacity: usize) -> Self {
        let free = if capacity > 0 {
            vec![Segment {
                start: 0,
                length: capacity,
            }]
        } else {
            Vec::new()
        };
        Self {
            free,
            used: IndexMap::new(),
        }
    }

    /// Sum of all free-segment lengths.
    pub(crate) fn free_total(&self) -> usize {
        self.free.iter().map(|s| s.length).sum()
    }

    /// Sum of all used-segment lengths. Test/invariant-checking only.
    #[cfg(test)]
    pub(crate) fn used_total(&self) -> usize {
        self.used.values().map(|s| s.length).sum()
    }

    /// Read-only view of the current free sequence. Test/diagnostic only.
    #[cfg(test)]
    pub(crate) fn free_segments(&self) -> &[Segment] {
        &self.free
    }

    /// Linear scan for the first free segment with `length >= n`.
    ///
    /// First-fit: cheaper than best-fit, and acceptable fragmentation
    /// behavior when paired with the two-tier compactor.
    pub(crate) fn find_free_fit(&self, n: usize) -> Option<usize> {
        self.free.iter().position(|s| s.length >= n)
    }

    /// Remove the free segment at `index`, re-inserting any remainder at
    /// the end of the free sequence, and return the start of the taken
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the segment at `index` is
    /// shorter than `n`. Callers must only pass indexes returned by
    /// [`SegmentIndex::find_free_fit`] for the same `n`.
    pub(crate) fn take(&mut self, index: usize, n: usize) -> usize {
        let segment = self.free.swap_remove(index);
        assert!(segment.length >= n, "take: segment shorter than request");
        let start = segment.start;
        if segment.length > n {
            self.free.push(Segment {
                start: start + n,
                length: segment.length - n,
            });
        }
        start
    }

    /// Record a new used segment for `handle`.
    pub(crate) fn record_used(&mut self, handle: Handle, start: usize, length: usize) {
        self.used.insert(handle, Segment { start, length });
    }

    /// Remove and return the used segment for `handle`, if live.
    pub(crate) fn drop_used(&mut self, handle: Handle) -> Option<(usize, usize)> {
        self.used
            .shift_remove(&handle)
            .map(|s| (s.start, s.length))
    }

    /// Look up the current location of a live handle.
    pub(crate) fn locate(&self, handle: Handle) -> Option<(usize, usize)> {
        self.used.get(&handle).map(|s| (s.start, s.length))
    }

    /// Append a freed range to the free sequence, unsorted.
    ///
    /// Deliberately O(1): merging adjacent free runs is deferred to tier-1
    /// compaction, which only runs when a commit cannot otherwise be
    /// served. This keeps `release` cheap.
    pub(crate) fn release_to_free(&mut self, start: usize, length: usize) {
        if length > 0 {
            self.free.push(Segment { start, length });
        }
    }

    /// Number of currently live used segments. Diagnostic only.
    pub(crate) fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Sort the free sequence by `start` and merge every pair of adjacent
    /// ranges whose `end` meets the next range's `start`.
    ///
    /// No payload bytes move; this only rewrites the free list. Returns
    /// `true` if any merge happened (used by the caller to decide whether
    /// the coalescing counted as a real tier-1 compaction).
    pub(crate) fn coalesce_free(&mut self) -> bool {
        if self.free.len() < 2 {
            return false;
        }
        self.free.sort_by_key(|s| s.start);
        let before = self.free.len();
        let mut merged = Vec::with_capacity(self.free.len());
        let mut current = self.free[0];
        for &next in &self.free[1..] {
            if current.end() == next.start {
                current.length += next.length;
            } else {
                merged.push(current);
                current = next;
            }
        }
        merged.push(current);
        self.free = merged;
        self.free.len() < before
    }

    /// Snapshot of all live `(handle, start, length)` triples, sorted
    /// ascending by current `start`.
    ///
    /// Used by tier-2 compaction, which must iterate used segments in
    /// `start` order while also rewriting their recorded `start` values —
    /// a snapshot avoids mutating the map while iterating it.
    pub(crate) fn used_snapshot_by_start(&self) -> Vec<(Handle, usize, usize)> {
        let mut snapshot: Vec<(Handle, usize, usize)> = self
            .used
            .iter()
            .map(|(&h, s)| (h, s.start, s.length))
            .collect();
        snapshot.sort_by_key(|&(_, start, _)| start);
        snapshot
    }

    /// Rewrite the recorded `start` for a live handle after relocation.
    /// The handle's key and length are unchanged.
    pub(crate) fn relocate_used(&mut self, handle: Handle, new_start: usize) {
        if let Some(segment) = self.used.get_mut(&handle) {
            segment.start = new_start;
        }
    }

    /// Replace the entire free sequence with a single run, used after
    /// tier-2 packs all used segments to the low end.
    pub(crate) fn set_single_free_run(&mut self, start: usize, length: usize) {
        self.free.clear();
        if length > 0 {
            self.free.push(Segment { start, length });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u64) -> Handle {
        Handle::new(n)
    }

    #[test]
    fn fresh_index_is_one_free_run() {
        let idx = SegmentIndex::new(100);
        assert_eq!(idx.free_total(), 100);
        assert_eq!(idx.used_total(), 0);
    }

    #[test]
    fn zero_capacity_has_no_free_segments() {
        let idx = SegmentIndex::new(0);
        assert_eq!(idx.free_total(), 0);
        assert!(idx.free_segments().is_empty());
    }

    #[test]
    fn take_exact_fit_removes_segment_entirely() {
        let mut idx = SegmentIndex::new(10);
        let i = idx.find_free_fit(10).unwrap();
        let start = idx.take(i, 10);
        assert_eq!(start, 0);
        assert_eq!(idx.free_total(), 0);
    }

    #[test]
    fn take_partial_fit_leaves_remainder() {
        let mut idx = SegmentIndex::new(10);
        let i = idx.find_free_fit(4).unwrap();
        let start = idx.take(i, 4);
        assert_eq!(start, 0);
        assert_eq!(idx.free_total(), 6);
    }

    #[test]
    fn record_and_drop_used_round_trip() {
        let mut idx = SegmentIndex::new(10);
        idx.record_used(h(1), 0, 4);
        assert_eq!(idx.locate(h(1)), Some((0, 4)));
        let dropped = idx.drop_used(h(1));
        assert_eq!(dropped, Some((0, 4)));
        assert_eq!(idx.locate(h(1)), None);
    }

    #[test]
    fn drop_unknown_handle_returns_none() {
        let mut idx = SegmentIndex::new(10);
        assert_eq!(idx.drop_used(h(99)), None);
    }

    #[test]
    fn coalesce_merges_adjacent_runs() {
        let mut idx = SegmentIndex::new(10);
        // Simulate two adjacent releases landing as separate free entries.
        idx.free.clear();
        idx.release_to_free(0, 4);
        idx.release_to_free(4, 6);
        assert!(idx.coalesce_free());
        assert_eq!(idx.free_segments(), &[Segment { start: 0, length: 10 }]);
    }

    #[test]
    fn coalesce_does_not_merge_non_adjacent_runs() {
        let mut idx = SegmentIndex::new(10);
        idx.free.clear();
        idx.release_to_free(0, 2);
        idx.release_to_free(4, 2);
        assert!(!idx.coalesce_free());
        assert_eq!(idx.free_total(), 4);
        assert_eq!(idx.free_segments().len(), 2);
    }

    #[test]
    fn coalesce_prunes_nothing_below_two_segments() {
        let mut idx = SegmentIndex::new(10);
        assert!(!idx.coalesce_free());
    }

    #[test]
    fn release_to_free_skips_zero_length() {
        let mut idx = SegmentIndex::new(10);
        idx.free.clear();
        idx.release_to_free(5, 0);
        assert!(idx.free_segments().is_empty());
    }

    #[test]
    fn used_snapshot_is_sorted_by_start() {
        let mut idx = SegmentIndex::new(100);
        idx.record_used(h(3), 30, 5);
        idx.record_used(h(1), 10, 5);
        idx.record_used(h(2), 20, 5);
        let snapshot = idx.used_snapshot_by_start();
        let starts: Vec<usize> = snapshot.iter().map(|&(_, s, _)| s).collect();
        assert_eq!(starts, vec![10, 20, 30]);
    }

    #[test]
    fn relocate_used_rewrites_start_only() {
        let mut idx = SegmentIndex::new(100);
        idx.record_used(h(1), 50, 10);
        idx.relocate_used(h(1), 0);
        assert_eq!(idx.locate(h(1)), Some((0, 10)));
    }
}
