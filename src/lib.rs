//! bounded-hash-table: a fixed-capacity, string-keyed hash table whose
//! memory and per-operation cost are fixed when it is built.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: bounded-memory key/value storage with a worst-case lookup cost
//!   that depends only on the configured capacity, never on how full the
//!   table is.
//! - Layers:
//!   - Geometry: derives `bucket_count` rows and `bucket_width` slots per
//!     row from the requested capacity.
//!   - BoundedHashTable<V, S>: one contiguous buffer of
//!     `bucket_count * bucket_width` slots. A key hashes to exactly one row
//!     and lives in one of that row's slots.
//!
//! Constraints
//! - No resizing, no rehashing, no chaining. All memory is allocated by
//!   the constructor.
//! - Every operation scans at most one row: O(bucket_width), which is
//!   O(log capacity).
//! - Keys are strings. Values are any `V`.
//! - Exclusive access through `&mut self`; wrap the whole table in one lock
//!   to share it between threads.
//!
//! Sizing
//! - Requests below `MIN_CAPACITY` (65) are raised to it; small tables
//!   have high per-bucket variance.
//! - `bucket_count = 2 * c`, `bucket_width = floor(log2 c) + 1`.
//! - New keys are refused once half of all slots are occupied (the
//!   admission cap). Under a well-mixed hasher a row saturates before the
//!   cap only with small probability; a saturated row rejects new keys
//!   that land in it while others still succeed.
//!
//! Failure semantics
//! - Capacity rejection, row saturation and misses are ordinary results:
//!   `bool`/`Result<_, InsertError>` from `set`/`insert`, `Option` from
//!   `get`/`delete`.
//! - The only argument error is an unset key passed to the checked entry
//!   points (`try_get`, `try_set`, `try_delete`), reported as
//!   `Error::InvalidArgument`.
//!
//! Counting
//! - `len()` counts occupied slots. Overwriting an existing key leaves it
//!   unchanged, so repeated updates never inflate `load()` or exhaust the
//!   admission cap.

mod bounded_hash_table;
mod bounded_hash_table_proptest;
mod error;
mod geometry;

// Public surface
pub use bounded_hash_table::{BoundedHashTable, Iter, IterMut};
pub use error::{Error, InsertError};
pub use geometry::{Geometry, MIN_CAPACITY};
