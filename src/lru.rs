//! Least Recently Used (LRU) ordering.
//!
//! Keeps every live entry in one intrusive list from most to least recently
//! used. A hit or an update moves the entry to the head; the tail is always
//! the next victim.
//!
//! # Performance Characteristics
//!
//! - `get`, `put`, eviction: O(1)
//! - Per-entry overhead: two `Option<Handle>` links plus the unused
//!   frequency counter shared with LFU entries
//!
//! # When to Use
//!
//! LRU suits workloads with temporal locality. It degrades on scans: a single
//! pass over more keys than the capacity flushes the whole working set. When
//! access counts matter more than recency, use [`LfuCache`](crate::LfuCache).
//!
//! # Examples
//!
//! ```
//! use keycache::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("apple", 1);
//! cache.put("banana", 2);
//! assert_eq!(cache.get(&"apple"), Some(&1));
//!
//! // "banana" is now the least recently used entry.
//! assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
//! assert!(!cache.contains(&"banana"));
//! ```

use crate::cache::Cache;
use crate::entry::{EntryStore, Handle};
use crate::list::List;
use crate::metrics::LruCacheMetrics;
use crate::policy::EvictionPolicy;
use crate::DefaultHashBuilder;
use alloc::collections::BTreeMap;
use alloc::string::String;

/// An LRU cache. See [`Cache`] for the full API.
pub type LruCache<K, V, S = DefaultHashBuilder> = Cache<K, V, RecencyOrder, S>;

/// Recency sequence for LRU eviction.
#[derive(Debug, Default)]
pub struct RecencyOrder {
    list: List,
    metrics: LruCacheMetrics,
}

impl RecencyOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a linked entry to the most recently used end.
    pub fn touch<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        self.metrics
            .record_promotion(self.list.head() == Some(handle));
        self.list.move_to_front(store, handle);
    }

    /// Links a new entry at the most recently used end.
    pub fn insert_front<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        self.list.push_front(store, handle);
    }

    /// The entry `evict_victim` would return, without unlinking it.
    pub fn peek_victim(&self) -> Option<Handle> {
        self.list.tail()
    }

    /// Handles from most to least recently used.
    pub fn iter<'a, K, V>(
        &self,
        store: &'a EntryStore<K, V>,
    ) -> impl Iterator<Item = Handle> + 'a {
        self.list.handles(store)
    }
}

impl EvictionPolicy for RecencyOrder {
    const NAME: &'static str = "LRU";

    #[inline]
    fn admit<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        self.insert_front(store, handle);
    }

    #[inline]
    fn promote<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        self.touch(store, handle);
    }

    #[inline]
    fn evict_victim<K, V>(&mut self, store: &mut EntryStore<K, V>) -> Option<Handle> {
        self.list.pop_back(store)
    }

    #[inline]
    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.reset();
    }

    fn extend_metrics(&self, metrics: &mut BTreeMap<String, f64>) {
        self.metrics.extend(metrics);
    }

    fn debug_validate_invariants<K, V>(&self, store: &EntryStore<K, V>) {
        assert_eq!(self.list.len(), store.len(), "recency list and store disagree");
        if self.list.is_empty() {
            assert!(self.list.head().is_none());
            assert!(self.list.tail().is_none());
            return;
        }

        let mut prev = None;
        let mut count = 0usize;
        for handle in self.list.handles(store) {
            let entry = &store[handle];
            assert_eq!(entry.prev, prev, "broken back link at slot {}", handle.index());
            prev = Some(handle);
            count += 1;
        }
        assert_eq!(count, self.list.len());
        assert_eq!(self.list.tail(), prev);
    }
}
