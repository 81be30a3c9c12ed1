//! Pool error types.
//!
//! Each failure family gets its own type rather than one shared enum:
//! [`OutOfSpace`] is ordinary control flow a caller is expected to handle
//! (spill to another tier, retry later), while [`InvalidHandle`] and
//! [`PoolCreationError`] indicate a programmer error. Folding all three
//! into one enum would let a caller match on `OutOfSpace` while silently
//! also matching `InvalidHandle`, which this split makes impossible.

use std::error::Error;
use std::fmt;

use crate::handle::Handle;

/// Errors from [`crate::Pool::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolCreationError {
    /// `capacity` was not a positive integer.
    InvalidCapacity {
        /// The rejected capacity value.
        capacity: i64,
    },
    /// The host could not provide a backing buffer of the requested size.
    OutOfMemory {
        /// The capacity that could not be allocated.
        requested: usize,
    },
}

impl fmt::Display for PoolCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { capacity } => {
                write!(f, "invalid capacity: {capacity} (must be > 0)")
            }
            Self::OutOfMemory { requested } => {
                write!(f, "failed to allocate a {requested}-byte arena")
            }
        }
    }
}

impl Error for PoolCreationError {}

/// A `commit` could not be serviced even after tier-2 compaction.
///
/// Distinguished from [`InvalidHandle`]/[`PoolCreationError`] because this
/// is routine control flow, not a bug: callers are expected to handle it
/// (e.g. spill to another storage tier) rather than treat it as a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfSpace {
    /// Number of bytes the failed commit requested.
    pub requested: usize,
    /// Total free bytes available at the time of failure.
    pub available: usize,
}

impl fmt::Display for OutOfSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "out of space: requested {} bytes, {} available",
            self.requested, self.available
        )
    }
}

impl Error for OutOfSpace {}

/// `read` or `release` was called with a handle not currently live in the
/// pool. Indicates a bug in the caller — the pool never re-issues a handle
/// that is already live, so a well-behaved caller never sees this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidHandle {
    /// The handle that was not found.
    pub handle: Handle,
}

impl fmt::Display for InvalidHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid handle: {}", self.handle)
    }
}

impl Error for InvalidHandle {}
