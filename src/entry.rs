//! Entry Store
//!
//! Owns every live cache slot. Entries live in a slot arena and are addressed
//! by [`Handle`]s, which are plain indices: relocating an entry inside an
//! ordering structure is index bookkeeping on its `prev`/`next` links, never
//! pointer surgery.
//!
//! # Layout
//!
//! ```text
//!   slots: Vec<Option<Entry<K, V>>>          free: Vec<usize>
//!   ┌─────┬──────────────────────────────┐   ┌───┐
//!   │  0  │ Some { key, value, freq, ◄►} │   │ 1 │  ← recycled by the
//!   │  1  │ None                         │   └───┘    next `create`
//!   │  2  │ Some { key, value, freq, ◄►} │
//!   └─────┴──────────────────────────────┘
//! ```
//!
//! A handle stays valid from `create` until `destroy`. Its slot is recycled
//! only after `destroy`, so a live handle is never aliased by another entry.
//!
//! Indexing the store with a stale handle panics: it means the cache's
//! bookkeeping has diverged from the store, which is an internal bug.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Stable reference to an entry in an [`EntryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    /// Returns the arena slot index of this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One live cache slot.
///
/// Besides the key and value, an entry carries its access frequency and the
/// intrusive links of whichever ordering list it currently belongs to.
#[derive(Debug)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) frequency: u64,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            frequency: 1,
            prev: None,
            next: None,
        }
    }

    /// The entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Access count. Starts at 1; only frequency-based policies advance it.
    #[inline]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Sets the access count. Ordering policies call this when they move the
    /// entry between frequency levels.
    #[inline]
    pub fn set_frequency(&mut self, frequency: u64) {
        self.frequency = frequency;
    }
}

/// Arena of entries with a free list.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> EntryStore<K, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores a new entry with frequency 1 and no links, returning its handle.
    pub fn create(&mut self, key: K, value: V) -> Handle {
        let entry = Entry::new(key, value);
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        Handle(idx)
    }

    /// Returns the value behind `handle`.
    #[inline]
    pub fn read(&self, handle: Handle) -> &V {
        &self[handle].value
    }

    /// Returns the value behind `handle` mutably.
    #[inline]
    pub fn read_mut(&mut self, handle: Handle) -> &mut V {
        &mut self[handle].value
    }

    /// Replaces the value behind `handle`, returning the previous one.
    #[inline]
    pub fn write(&mut self, handle: Handle, value: V) -> V {
        core::mem::replace(&mut self[handle].value, value)
    }

    /// Removes the entry and frees its slot.
    ///
    /// The caller must already have unlinked the entry from its ordering list.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to a live entry.
    pub fn destroy(&mut self, handle: Handle) -> Entry<K, V> {
        let Some(entry) = self.slots.get_mut(handle.0).and_then(Option::take) else {
            panic!("destroy of stale entry handle {}", handle.0);
        };
        debug_assert!(entry.prev.is_none() && entry.next.is_none());
        self.free.push(handle.0);
        self.len -= 1;
        entry
    }

    /// Returns the entry behind `handle`, if it is live.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// Returns the entry behind `handle` mutably, if it is live.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no entries are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry and forgets all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Entry<K, V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|entry| (Handle(idx), entry)))
    }
}

impl<K, V> Default for EntryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<Handle> for EntryStore<K, V> {
    type Output = Entry<K, V>;

    fn index(&self, handle: Handle) -> &Entry<K, V> {
        match self.get(handle) {
            Some(entry) => entry,
            None => panic!("stale entry handle {}", handle.0),
        }
    }
}

impl<K, V> IndexMut<Handle> for EntryStore<K, V> {
    fn index_mut(&mut self, handle: Handle) -> &mut Entry<K, V> {
        match self.get_mut(handle) {
            Some(entry) => entry,
            None => panic!("stale entry handle {}", handle.0),
        }
    }
}
