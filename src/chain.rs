//! Chain: the doubly-linked sequence of buckets sharing one slot.
//!
//! A chain never owns its buckets directly; they live in the table's
//! `Arena` and the chain records `head`, `tail` and `len` as arena keys.
//! Every method that touches links takes the arena explicitly so the
//! table can borrow its slot array and its arena independently.
//!
//! Invariants (checked by `check_links` in tests):
//! - `head.prev` and `tail.next` are `None`.
//! - Walking `next` from `head` reaches `tail` after exactly `len` steps,
//!   and walking `prev` from `tail` visits the same buckets in reverse.
//! - `head` and `tail` are both `None` iff `len == 0`.

use crate::bucket::{Arena, Bucket, BucketKey};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chain {
    head: Option<BucketKey>,
    tail: Option<BucketKey>,
    len: usize,
}

impl Chain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> Option<BucketKey> {
        self.head
    }

    /// Find the bucket whose key equals `key` by content.
    pub(crate) fn find<V>(&self, arena: &Arena<V>, key: &str) -> Option<BucketKey> {
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let bucket = &arena[k];
            if &*bucket.key == key {
                return Some(k);
            }
            cursor = bucket.next;
        }
        None
    }

    /// Store `bucket` in the arena and append it at the tail.
    pub(crate) fn push_back<V>(&mut self, arena: &mut Arena<V>, bucket: Bucket<V>) -> BucketKey {
        let k = arena.insert(bucket);
        self.link_back(arena, k);
        k
    }

    /// Append an arena bucket at the tail, overwriting any stale links it
    /// carries from a previous chain.
    pub(crate) fn link_back<V>(&mut self, arena: &mut Arena<V>, k: BucketKey) {
        self.link_after(arena, self.tail, k);
    }

    /// Link `k` directly after `after`, or at the head when `after` is `None`.
    pub(crate) fn link_after<V>(
        &mut self,
        arena: &mut Arena<V>,
        after: Option<BucketKey>,
        k: BucketKey,
    ) {
        let next = match after {
            Some(a) => arena[a].next,
            None => self.head,
        };
        {
            let bucket = &mut arena[k];
            bucket.prev = after;
            bucket.next = next;
        }
        match after {
            Some(a) => arena[a].next = Some(k),
            None => self.head = Some(k),
        }
        match next {
            Some(n) => arena[n].prev = Some(k),
            None => self.tail = Some(k),
        }
        self.len += 1;
    }

    /// Detach `k` from this chain, leaving it in the arena with cleared links.
    pub(crate) fn unlink<V>(&mut self, arena: &mut Arena<V>, k: BucketKey) {
        let (prev, next) = {
            let bucket = &arena[k];
            (bucket.prev, bucket.next)
        };
        match (prev, next) {
            // sole element
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
            // tail element
            (Some(p), None) => {
                arena[p].next = None;
                self.tail = Some(p);
            }
            // head element
            (None, Some(n)) => {
                arena[n].prev = None;
                self.head = Some(n);
            }
            // interior element
            (Some(p), Some(n)) => {
                arena[p].next = Some(n);
                arena[n].prev = Some(p);
            }
        }
        let bucket = &mut arena[k];
        bucket.prev = None;
        bucket.next = None;
        self.len -= 1;
    }

    /// Unlink `k` and take it out of the arena.
    pub(crate) fn remove<V>(&mut self, arena: &mut Arena<V>, k: BucketKey) -> Option<Bucket<V>> {
        if !arena.contains_key(k) {
            return None;
        }
        self.unlink(arena, k);
        arena.remove(k)
    }

    /// Walk the chain in both directions, asserting link integrity.
    /// Returns the keys head-to-tail.
    #[cfg(test)]
    pub(crate) fn check_links<V>(&self, arena: &Arena<V>) -> Vec<BucketKey> {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let bucket = arena.get(k).expect("chain links to a live bucket");
            assert_eq!(bucket.prev, prev, "prev link mismatch");
            forward.push(k);
            prev = Some(k);
            cursor = bucket.next;
        }
        assert_eq!(self.tail, prev, "tail must be the last bucket reached");
        assert_eq!(forward.len(), self.len, "len must match reachable buckets");

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(k) = cursor {
            backward.push(k);
            cursor = arena[k].prev;
        }
        backward.reverse();
        assert_eq!(forward, backward, "backward walk must mirror forward walk");
        forward
    }
}
