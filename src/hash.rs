//! Hash functions accepted by `ChainedHashMap`.
//!
//! A hash function must be a pure function of the key's content: the
//! table assumes `hash(k)` is stable for as long as `k` is stored, and
//! only recomputes slots when the function is replaced through
//! `ChainedHashMap::set_hash_function`.

use core::hash::BuildHasher;

/// Single-method capability mapping key text to an unsigned integer.
///
/// Implemented for every `Fn(&str) -> u32`, so plain functions and
/// closures can be passed directly.
pub trait HashFunction {
    fn hash(&self, key: &str) -> u32;
}

impl<F> HashFunction for F
where
    F: Fn(&str) -> u32,
{
    #[inline]
    fn hash(&self, key: &str) -> u32 {
        self(key)
    }
}

/// Default hash: wrapping sum of the key's bytes.
///
/// Weak by construction. Anagrams and any keys with equal byte sums land
/// in the same slot; replace it with `set_hash_function` when keys cluster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SumHash;

impl HashFunction for SumHash {
    #[inline]
    fn hash(&self, key: &str) -> u32 {
        key.bytes()
            .fold(0u32, |sum, b| sum.wrapping_add(u32::from(b)))
    }
}

/// Adapter turning a `BuildHasher` into a `HashFunction`.
///
/// The 64-bit output is folded to 32 bits. The builder's seed is fixed at
/// construction, so the resulting function stays pure for its lifetime.
#[derive(Clone, Debug, Default)]
pub struct BuildHasherFn<S> {
    build: S,
}

impl<S: BuildHasher> BuildHasherFn<S> {
    pub fn new(build: S) -> Self {
        Self { build }
    }
}

impl<S: BuildHasher> HashFunction for BuildHasherFn<S> {
    #[inline]
    fn hash(&self, key: &str) -> u32 {
        let h = self.build.hash_one(key);
        (h ^ (h >> 32)) as u32
    }
}

/// hashbrown's default (aHash-based) builder as a table hash function.
pub type DefaultHashFn = BuildHasherFn<hashbrown::hash_map::DefaultHashBuilder>;
