//! Intrusive doubly linked list threaded through an [`EntryStore`].
//!
//! The list itself only holds `head`, `tail` and a length; the `prev`/`next`
//! links live inside each [`Entry`](crate::entry::Entry). An entry belongs to
//! at most one list at a time, which is what lets the LFU buckets and the LRU
//! recency sequence share one entry layout.
//!
//! ```text
//!   head (most recent)                              tail (least recent)
//!     │                                                  │
//!     ▼                                                  ▼
//!   [h3] ◄──────► [h0] ◄──────► [h7] ◄──────► [h2]
//! ```
//!
//! Every operation is O(1) except [`List::handles`].

use crate::entry::{EntryStore, Handle};

/// Head/tail bookkeeping for a list of entries ordered by recency.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct List {
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl List {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of entries linked into this list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently linked entry.
    #[inline]
    pub fn head(&self) -> Option<Handle> {
        self.head
    }

    /// Least recently linked entry; the next one `pop_back` returns.
    #[inline]
    pub fn tail(&self) -> Option<Handle> {
        self.tail
    }

    /// Links a detached entry at the head.
    pub fn push_front<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        let old_head = self.head;
        {
            let entry = &mut store[handle];
            debug_assert!(entry.prev.is_none() && entry.next.is_none());
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(old) => store[old].prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.len += 1;
    }

    /// Detaches `handle` from this list, leaving its links cleared.
    ///
    /// `handle` must currently be linked into this list.
    pub fn unlink<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        debug_assert!(self.len > 0);
        let (prev, next) = {
            let entry = &mut store[handle];
            (entry.prev.take(), entry.next.take())
        };
        match prev {
            Some(p) => store[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => store[n].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Detaches and returns the tail entry.
    pub fn pop_back<K, V>(&mut self, store: &mut EntryStore<K, V>) -> Option<Handle> {
        let tail = self.tail?;
        self.unlink(store, tail);
        Some(tail)
    }

    /// Moves a linked entry to the head.
    pub fn move_to_front<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(store, handle);
        self.push_front(store, handle);
    }

    /// Forgets all links without touching the store. Only valid when the
    /// store is cleared at the same time.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Walks the list from head to tail.
    pub fn handles<'a, K, V>(&self, store: &'a EntryStore<K, V>) -> Handles<'a, K, V> {
        Handles {
            store,
            next: self.head,
            remaining: self.len,
        }
    }
}

/// Iterator over the handles of a [`List`], head to tail.
#[derive(Debug)]
pub struct Handles<'a, K, V> {
    store: &'a EntryStore<K, V>,
    next: Option<Handle>,
    remaining: usize,
}

impl<K, V> Iterator for Handles<'_, K, V> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        // `remaining` bounds the walk even if links were corrupted into a cycle.
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.next = self.store.get(current).and_then(|entry| entry.next);
        self.remaining -= 1;
        Some(current)
    }
}
