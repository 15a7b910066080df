//! probe-table: a generic open-addressing hash table with linear probing,
//! tombstone deletion and automatic grow/shrink.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one canonical, generic table type whose hash and equality
//!   functions are fixed at compile time, with no runtime dispatch.
//! - Layers:
//!   - Slot<K, V>: one cell of the backing array; `Empty`, `Tombstone` or
//!     `Occupied` with the key's cached hash.
//!   - KeyOps<K>: the (hash, equality) pair a table is instantiated with.
//!     Stock impls: `HasherOps` (any `Hash + Eq` key through a
//!     `BuildHasher`), `Djb2` (byte strings), `Identity` (integers and
//!     bytes), `FnOps` (a pair of closures).
//!   - Table<K, V, O>: the container. insert / update / find / delete over a
//!     single `Vec<Slot<K, V>>`, resized according to a `TableConfig`.
//!   - text / report: thin collaborators used by the `probe-table` binary to
//!     count tokens and bytes of a file and print the most frequent.
//!
//! Constraints
//! - Single-threaded: every operation, including a rehash, runs to
//!   completion inside the call that triggered it. No interior mutability.
//! - Returned `&V` / `&mut V` borrow the table; the borrow checker enforces
//!   that they are gone before the next mutation can move the slot array.
//! - Allocation failures surface as `TableError::OutOfMemory` and leave the
//!   table as it was.
//!
//! Capacity policy
//! - Grow ×2 before placing a new key once it would bring the load to
//!   `grow_at` (default 0.75).
//! - Shrink ÷2 after a delete once the load drops under `shrink_below`
//!   (default 0.25), never below `min_capacity` (default 4).
//! - `shrink_below < grow_at / 2` is enforced so the two triggers cannot
//!   chase each other.
//! - With `resizable = false` the capacity is fixed and a full table reports
//!   `TableError::Full`.
//!
//! Deletion
//! - Deleting leaves a tombstone: lookups continue past it, inserts reuse it.
//!   Any rehash drops all tombstones, and a same-capacity rehash runs when
//!   tombstones alone push the table over the grow threshold.
//!
//! Notes and non-goals
//! - No thread safety, no iteration order guarantees, no persistence.
//! - The table trusts `KeyOps`: `eq(a, b)` must imply `hash(a) == hash(b)`.

pub mod config;
pub mod error;
pub mod key_ops;
pub mod logger;
pub mod report;
pub mod slot;
pub mod table;
mod table_proptest;
pub mod text;

// Public surface
pub use config::TableConfig;
pub use error::{ConfigError, TableError};
pub use key_ops::{Djb2, FnOps, HasherOps, Identity, KeyOps};
pub use slot::Slot;
pub use table::{IntoIter, Iter, IterMut, Table};
