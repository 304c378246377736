//! ChainedHashMap: slot array of lazily created chains over a bucket arena.

use core::fmt;
use core::iter::FusedIterator;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::bucket::{Arena, Bucket, BucketKey};
use crate::chain::Chain;
use crate::error::Error;
use crate::hash::{HashFunction, SumHash};

/// Slot count used by `Default`.
pub const DEFAULT_KEY_SPACE: usize = 1024;

/// Outcome of `insert` / `insert_with`.
#[derive(Debug, PartialEq, Eq)]
pub enum Insert<V> {
    /// The key was new; a bucket was appended at its chain's tail.
    Created,
    /// The key existed and the resolver's result replaced its value.
    Resolved,
    /// Nothing was stored. The rejected value is handed back: the key was
    /// empty, or it already existed and no resolver was supplied.
    Ignored(V),
}

/// String-keyed map using separate chaining with a swappable hash function.
///
/// Every stored key lives in the chain at `hash(key) % key_space()` under
/// the currently active hash function. Chains keep insertion order, and
/// iteration walks slots in ascending order, each chain head to tail.
pub struct ChainedHashMap<V> {
    slots: Vec<Option<Chain>>,
    buckets: Arena<V>,
    hash: Box<dyn HashFunction>,
}

impl<V> ChainedHashMap<V> {
    /// Create an empty table with `key_space` slots and the byte-sum hash.
    pub fn new(key_space: usize) -> Result<Self, Error> {
        Self::with_hash_function(key_space, SumHash)
    }

    pub fn with_hash_function<H>(key_space: usize, hash: H) -> Result<Self, Error>
    where
        H: HashFunction + 'static,
    {
        let slots = empty_slots(key_space)?;
        debug!(key_space, "created chained hash map");
        Ok(Self {
            slots,
            buckets: SlotMap::with_key(),
            hash: Box::new(hash),
        })
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn key_space(&self) -> usize {
        self.slots.len()
    }

    /// Slot that `key` maps to under the active hash function.
    pub fn slot_of(&self, key: &str) -> usize {
        self.hash.hash(key) as usize % self.slots.len()
    }

    /// Number of entries in `slot`'s chain, or `None` if the slot has
    /// never been addressed (or is out of range).
    pub fn chain_len(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot)?.as_ref().map(Chain::len)
    }

    fn locate(&self, key: &str) -> Option<(usize, BucketKey)> {
        let slot = self.slot_of(key);
        let chain = self.slots[slot].as_ref()?;
        chain.find(&self.buckets, key).map(|k| (slot, k))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let (_, k) = self.locate(key)?;
        self.buckets.get(k).map(|b| &b.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (_, k) = self.locate(key)?;
        self.buckets.get_mut(k).map(|b| &mut b.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Insert `key -> value` if `key` is absent.
    ///
    /// An existing key keeps its value and `value` is returned in
    /// `Insert::Ignored`. Empty keys are never stored.
    pub fn insert(&mut self, key: &str, value: V) -> Insert<V> {
        self.insert_impl(key, value, None::<fn(V, V) -> V>)
    }

    /// Insert `key -> value`, merging with `resolve(existing, value)` when
    /// `key` is already present.
    ///
    /// The resolver owns both values and decides what becomes of the
    /// previous one. The entry keeps its position in its chain. If
    /// `resolve` panics, the entry is gone from the table.
    pub fn insert_with<F>(&mut self, key: &str, value: V, resolve: F) -> Insert<V>
    where
        F: FnOnce(V, V) -> V,
    {
        self.insert_impl(key, value, Some(resolve))
    }

    fn insert_impl<F>(&mut self, key: &str, value: V, resolve: Option<F>) -> Insert<V>
    where
        F: FnOnce(V, V) -> V,
    {
        if key.is_empty() {
            return Insert::Ignored(value);
        }
        let slot = self.slot_of(key);
        let chain = self.slots[slot].get_or_insert_with(|| {
            trace!(slot, "allocating chain");
            Chain::new()
        });

        let Some(k) = chain.find(&self.buckets, key) else {
            chain.push_back(&mut self.buckets, Bucket::new(key, value));
            return Insert::Created;
        };
        let Some(resolve) = resolve else {
            return Insert::Ignored(value);
        };

        // Detach the bucket so the resolver receives the stored value by
        // move, then relink the merged entry where it was.
        let prev = self.buckets[k].prev;
        let Some(Bucket { key: owned_key, value: existing, .. }) =
            chain.remove(&mut self.buckets, k)
        else {
            return Insert::Ignored(value);
        };
        let merged = resolve(existing, value);
        let k = self.buckets.insert(Bucket::from_owned(owned_key, merged));
        chain.link_after(&mut self.buckets, prev, k);
        Insert::Resolved
    }

    /// Remove `key`, handing its value back to the caller.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let (slot, k) = self.locate(key)?;
        let chain = self.slots[slot].as_mut()?;
        chain.remove(&mut self.buckets, k).map(|b| b.value)
    }

    /// Remove `key` and pass its value to `destroy`. Returns whether the
    /// key was present.
    ///
    /// The bucket is unlinked before `destroy` runs, so the table is
    /// already consistent when caller code sees the value.
    pub fn remove_with<F>(&mut self, key: &str, destroy: F) -> bool
    where
        F: FnOnce(V),
    {
        match self.remove(key) {
            Some(value) => {
                destroy(value);
                true
            }
            None => false,
        }
    }

    /// Visit every entry in iteration order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &V),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Visit every entry in iteration order with mutable access to values.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut V),
    {
        for chain in self.slots.iter().flatten() {
            let mut cursor = chain.head();
            while let Some(k) = cursor {
                let bucket = &mut self.buckets[k];
                f(&*bucket.key, &mut bucket.value);
                cursor = bucket.next;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            buckets: &self.buckets,
            cursor: None,
            remaining: self.buckets.len(),
        }
    }

    /// Tear the table down, passing every value to `destroy` exactly once
    /// in iteration order.
    pub fn destroy_with<F>(mut self, mut destroy: F)
    where
        F: FnMut(V),
    {
        for chain in core::mem::take(&mut self.slots).into_iter().flatten() {
            let mut cursor = chain.head();
            while let Some(bucket) = cursor.and_then(|k| self.buckets.remove(k)) {
                cursor = bucket.next;
                destroy(bucket.value);
            }
        }
        debug_assert!(self.buckets.is_empty());
    }

    /// Replace the hash function and redistribute every entry under it.
    ///
    /// On error the table is unchanged and keeps its previous function.
    pub fn set_hash_function<H>(&mut self, hash: H) -> Result<(), Error>
    where
        H: HashFunction + 'static,
    {
        let hash: Box<dyn HashFunction> = Box::new(hash);
        if self.is_empty() {
            self.hash = hash;
            return Ok(());
        }
        self.rehash(self.slots.len(), Some(hash))
    }

    /// Change the slot count and redistribute every entry.
    ///
    /// On error the table is unchanged.
    pub fn resize(&mut self, key_space: usize) -> Result<(), Error> {
        self.rehash(key_space, None)
    }

    fn rehash(&mut self, key_space: usize, hash: Option<Box<dyn HashFunction>>) -> Result<(), Error> {
        // Nothing is touched until the new slot array exists.
        let fresh = empty_slots(key_space)?;
        if let Some(hash) = hash {
            self.hash = hash;
        }
        let old = core::mem::replace(&mut self.slots, fresh);
        debug!(
            from = old.len(),
            to = key_space,
            len = self.buckets.len(),
            "rehashing chained hash map"
        );

        // Buckets stay put in the arena; only their links are rebuilt, so
        // migration performs no allocation.
        for chain in old.into_iter().flatten() {
            let mut cursor = chain.head();
            while let Some(k) = cursor {
                cursor = self.buckets[k].next;
                let slot = self.slot_of(&self.buckets[k].key);
                self.slots[slot]
                    .get_or_insert_with(Chain::new)
                    .link_back(&mut self.buckets, k);
            }
        }
        Ok(())
    }

    /// Assert every structural invariant: chain links, chain counts, slot
    /// placement under the active hash, and the global count.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut total = 0;
        for (slot, chain) in self.slots.iter().enumerate() {
            let Some(chain) = chain else { continue };
            for k in chain.check_links(&self.buckets) {
                let key = &self.buckets[k].key;
                assert_eq!(self.slot_of(key), slot, "key {key:?} in wrong slot");
                assert!(!key.is_empty(), "empty key stored");
            }
            total += chain.len();
        }
        assert_eq!(total, self.buckets.len(), "chain counts must sum to len");
    }
}

fn empty_slots(key_space: usize) -> Result<Vec<Option<Chain>>, Error> {
    if key_space == 0 {
        return Err(Error::InvalidConfiguration { key_space });
    }
    let mut slots = Vec::new();
    slots.try_reserve_exact(key_space)?;
    slots.resize(key_space, None);
    Ok(slots)
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self {
            slots: vec![None; DEFAULT_KEY_SPACE],
            buckets: SlotMap::with_key(),
            hash: Box::new(SumHash),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over entries in slot-ascending, then insertion, order.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Option<Chain>>,
    buckets: &'a Arena<V>,
    cursor: Option<BucketKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let bucket = &self.buckets[k];
                self.cursor = bucket.next;
                self.remaining -= 1;
                return Some((&*bucket.key, &bucket.value));
            }
            match self.slots.next()? {
                Some(chain) => self.cursor = chain.head(),
                None => continue,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
