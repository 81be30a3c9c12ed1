//! Fixed-capacity, byte-addressable memory pool with two-tier compaction.
//!
//! Stores opaque binary payloads inside a single pre-allocated arena and
//! returns opaque [`Handle`]s by which payloads are later read back or
//! released. Intended for bounding and amortizing the cost of many small
//! allocations in a data-processing engine: commit intermediate byte blobs,
//! hand the returned handles around a pipeline, release them when the
//! consumer is done.
//!
//! The hard engineering is fragmentation control: [`Pool::commit`] keeps
//! serving variable-sized requests against a bounded arena as free space
//! scatters, via first-fit allocation backed by a two-tier compactor
//! (cheap adjacent-run coalescing, then a more expensive relocation pass).
//! See [`compactor`] for the algorithm and spec.md §4.3 for its derivation.
//!
//! # Example
//!
//! ```
//! use mempool_core::{Pool, PoolConfig, RandomHandleSource};
//!
//! let config = PoolConfig::new(1024).unwrap();
//! let pool = Pool::new(config, RandomHandleSource::new()).unwrap();
//!
//! let handle = pool.commit(b"hello").unwrap();
//! assert_eq!(pool.read(handle).unwrap(), b"hello");
//! pool.release(handle).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod arena;
mod compactor;
mod config;
mod error;
mod handle;
mod pool;
mod segment;
mod stats;

pub use config::PoolConfig;
pub use error::{InvalidHandle, OutOfSpace, PoolCreationError};
pub use handle::{Handle, HandleSource, RandomHandleSource};
pub use pool::Pool;
pub use stats::PoolStats;
