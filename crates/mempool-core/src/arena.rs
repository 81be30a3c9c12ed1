//! The fixed-size byte buffer backing a pool.
//!
//! [`Arena`] performs no bookkeeping of its own — it is a dumb backing
//! store exposing only offset-addressed reads and writes. All fragmentation
//! and allocation logic lives in [`crate::segment`] and [`crate::compactor`].

/// A contiguous, fixed-length byte buffer.
///
/// Allocated to full capacity at construction and never resized, so the
/// addresses handed out by the allocator remain valid for the arena's
/// entire lifetime (barring relocation, which the allocator performs by
/// explicit copy, not by growing this buffer).
pub struct Arena {
    data: Vec<u8>,
}

impl Arena {
    /// Allocate a zero-filled arena of exactly `capacity` bytes.
    ///
    /// Returns `None` if the backing allocation could not be reserved.
    pub fn new(capacity: usize) -> Option<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity).ok()?;
        data.resize(capacity, 0);
        Some(Self { data })
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Write `bytes` into the arena starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + bytes.len()` exceeds [`Arena::capacity`]. The
    /// allocator is responsible for only ever requesting ranges it has
    /// already validated against the segment index.
    pub fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Read `len` bytes starting at `offset`, returned as a fresh copy.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds [`Arena::capacity`].
    pub fn read_at(&self, offset: usize, len: usize) -> Vec<u8> {
        self.data[offset..offset + len].to_vec()
    }

    /// Copy `len` bytes from `src` to `dst` within the same arena.
    ///
    /// Used by tier-2 compaction to relocate payloads toward the low end.
    /// Source and destination ranges may overlap (relocation always moves
    /// bytes to a lower or equal offset, so `copy_within` handles this
    /// correctly).
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds [`Arena::capacity`].
    pub fn copy_within(&mut self, src: usize, dst: usize, len: usize) {
        self.data.copy_within(src..src + len, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_arena_is_zero_filled() {
        let arena = Arena::new(16).unwrap();
        assert_eq!(arena.read_at(0, 16), vec![0u8; 16]);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut arena = Arena::new(16).unwrap();
        arena.write_at(4, b"abcd");
        assert_eq!(arena.read_at(4, 4), b"abcd");
    }

    #[test]
    fn copy_within_moves_bytes_down() {
        let mut arena = Arena::new(16).unwrap();
        arena.write_at(8, b"xyz");
        arena.copy_within(8, 0, 3);
        assert_eq!(arena.read_at(0, 3), b"xyz");
    }

    #[test]
    fn zero_length_capacity_rejected_by_pool_layer_not_arena() {
        // Arena itself tolerates capacity 0; PoolConfig is what enforces
        // capacity > 0 for the pool as a whole.
        let arena = Arena::new(0).unwrap();
        assert_eq!(arena.capacity(), 0);
    }
}
