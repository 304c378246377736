//! Bucket: one key/value entry stored in the table-wide arena.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational index of a bucket inside the arena.
    pub(crate) struct BucketKey;
}

/// Arena owning every bucket of a table. Chains only hold keys into it.
pub(crate) type Arena<V> = SlotMap<BucketKey, Bucket<V>>;

#[derive(Debug)]
pub(crate) struct Bucket<V> {
    pub(crate) key: Box<str>,
    pub(crate) value: V,
    // Non-owning neighbor links within the bucket's chain.
    pub(crate) prev: Option<BucketKey>,
    pub(crate) next: Option<BucketKey>,
}

impl<V> Bucket<V> {
    /// Copy `key` into a fresh, unlinked bucket.
    pub(crate) fn new(key: &str, value: V) -> Self {
        Self::from_owned(key.into(), value)
    }

    pub(crate) fn from_owned(key: Box<str>, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }
}
