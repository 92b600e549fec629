//! Key Index: key → entry handle.
//!
//! A plain hash map with no ordering semantics. Every cache operation starts
//! here, so it is the only place keys are hashed.

use crate::entry::Handle;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

#[derive(Debug)]
pub(crate) struct KeyIndex<K, S> {
    map: HashMap<K, Handle, S>,
}

impl<K: Hash + Eq, S: BuildHasher> KeyIndex<K, S> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    #[inline]
    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    #[inline]
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    #[inline]
    pub(crate) fn insert(&mut self, key: K, handle: Handle) {
        let previous = self.map.insert(key, handle);
        debug_assert!(previous.is_none(), "key indexed twice");
    }

    #[inline]
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}
