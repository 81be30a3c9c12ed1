//! Opaque handles and the injected handle-generation capability.
//!
//! A [`Handle`] identifies a committed payload. It carries no information
//! about where the payload lives — that mapping is owned by the segment
//! index — so handles stay valid across compaction, which may move the
//! underlying bytes.

use std::fmt;

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Opaque 64-bit identifier returned by [`crate::Pool::commit`].
///
/// Handles are minted by a [`HandleSource`] and are meaningless outside the
/// pool that issued them. Two pools may hand out colliding handle values
/// without consequence, since each pool's used-segment map is private.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Construct a handle from a raw 64-bit value.
    ///
    /// Exists so that custom [`HandleSource`] implementations outside this
    /// crate (e.g. a deterministic counter for tests) can produce
    /// [`Handle`]s. The pool places no constraints on which values are
    /// valid — any `u64` is a legal handle until it collides with one
    /// already live, which is the handle source's responsibility to avoid.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value underlying this handle.
    ///
    /// Exposed for diagnostics and logging; the pool never interprets
    /// this value as anything but an opaque map key.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#018x})", self.0)
    }
}

/// Capability that mints fresh [`Handle`] values at commit time.
///
/// Keeping handle generation outside the pool makes the pool deterministic
/// in tests (inject a counter, see `mempool-test-utils::CounterHandleSource`)
/// and lets production inject a high-entropy source. The pool does not
/// itself check for collisions with live handles on insert; a source drawn
/// from a sufficiently large space makes that collision negligible for any
/// expected working set.
pub trait HandleSource: Send {
    /// Produce a fresh handle. Called once per successful `commit`,
    /// including zero-length commits.
    fn next_handle(&mut self) -> Handle;
}

/// Production [`HandleSource`] backed by a ChaCha20 stream seeded from OS
/// entropy.
///
/// 64-bit uniform draws make an accidental collision with a live handle
/// astronomically unlikely for any working set this pool is sized for: by
/// the birthday bound, `2^32` live handles are needed before a collision
/// becomes as likely as not. A query-engine pool holding that many
/// concurrent commits would already have exhausted its arena many times
/// over.
pub struct RandomHandleSource {
    rng: ChaCha20Rng,
}

impl RandomHandleSource {
    /// Seed a new source from the OS entropy pool.
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(rand::random()),
        }
    }

    /// Seed a new source deterministically, for reproducible test runs
    /// that still want to exercise the production code path.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomHandleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleSource for RandomHandleSource {
    fn next_handle(&mut self) -> Handle {
        Handle::new(self.rng.random::<u64>())
    }
}
