//! chained-hashmap: a single-threaded, string-keyed map built on separate
//! chaining, with caller-supplied collision resolution and a hash function
//! that can be swapped at runtime.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the chain protocol (append, find, unlink) small and
//!   separately testable, and let the table only decide *which* chain.
//! - Layers:
//!   - `Bucket<V>`: owned key copy, stored value, non-owning `prev`/`next`
//!     links. Lives in one table-wide `slotmap` arena.
//!   - `Chain`: `head`/`tail`/`len` over arena keys; owns the relinking
//!     rules for all four removal topologies (sole, head, tail, interior).
//!   - `ChainedHashMap<V>`: slot array of lazily created chains, the arena,
//!     and the active `HashFunction`.
//!
//! Constraints
//! - Single-threaded: every mutation takes `&mut self`; no locking.
//! - Slots are never released once a chain exists, even when emptied.
//! - Chains keep insertion order; iteration is slot-ascending, then
//!   head-to-tail. Resolving a duplicate key keeps the entry in place.
//! - Keys are copied on insert; values are stored as given. Storing `&T`
//!   or `Rc<T>` keeps the data owned by the caller.
//!
//! Rehashing
//! - Triggered by `set_hash_function` and `resize`. The new slot array is
//!   reserved with `try_reserve_exact` before anything changes; a failure
//!   leaves the old array and old hash function in place.
//! - Migration walks the old slots in order and relinks each bucket at the
//!   tail of its new chain. Buckets never move in the arena, so migration
//!   cannot allocate or fail part-way.
//!
//! Absent inputs
//! - Empty keys are never stored; lookups and removals of missing keys
//!   return `None`. Neither is an error.

mod bucket;
mod chain;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
mod error;
pub mod hash;
pub mod wordcount;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Insert, Iter, DEFAULT_KEY_SPACE};
pub use error::Error;
pub use hash::{BuildHasherFn, DefaultHashFn, HashFunction, SumHash};
