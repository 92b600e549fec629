//! Least Frequently Used (LFU) ordering.
//!
//! Entries are grouped into buckets by access count. Each bucket is an
//! intrusive recency list, so among entries with the same count the one
//! touched longest ago leaves first.
//!
//! ```text
//!   min_frequency = 1
//!
//!   freq 1: [e] ◄► [d]            ← victim is `d` (tail of the min bucket)
//!   freq 2: [a]
//!   freq 5: [c] ◄► [b]
//! ```
//!
//! A `get` hit or a `put` update moves the entry from bucket `f` to the head
//! of bucket `f + 1`. New entries always enter bucket 1.
//!
//! # Lazy minimum
//!
//! `min_frequency` is maintained in O(1) without scanning buckets:
//!
//! - when an access empties the minimum bucket, the minimum moves up by one,
//!   because the accessed entry just landed in the next bucket;
//! - an eviction that empties the minimum bucket leaves `min_frequency`
//!   pointing at the removed bucket. The cache only evicts to make room, and
//!   the insertion that follows resets the minimum to 1.
//!
//! # Examples
//!
//! ```
//! use keycache::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//!
//! // "b" was used once, "a" twice.
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! assert_eq!(cache.frequency(&"a"), Some(2));
//! assert_eq!(cache.min_frequency(), Some(1));
//! ```

use crate::cache::Cache;
use crate::entry::{EntryStore, Handle};
use crate::list::List;
use crate::metrics::LfuCacheMetrics;
use crate::policy::EvictionPolicy;
use crate::DefaultHashBuilder;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An LFU cache with recency tie-breaking. See [`Cache`] for the full API.
pub type LfuCache<K, V, S = DefaultHashBuilder> = Cache<K, V, FrequencyOrder, S>;

/// Frequency buckets for LFU eviction.
#[derive(Debug)]
pub struct FrequencyOrder {
    buckets: HashMap<u64, List>,
    min_frequency: u64,
    len: usize,
    metrics: LfuCacheMetrics,
}

impl Default for FrequencyOrder {
    fn default() -> Self {
        Self {
            buckets: HashMap::default(),
            min_frequency: 1,
            len: 0,
            metrics: LfuCacheMetrics::default(),
        }
    }
}

impl FrequencyOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current minimum frequency. See the module docs for when it may lag.
    #[inline]
    pub fn min_frequency(&self) -> u64 {
        self.min_frequency
    }

    /// Number of non-empty frequency buckets.
    #[inline]
    pub fn levels(&self) -> usize {
        self.buckets.len()
    }

    /// Number of entries at `frequency`.
    pub fn bucket_len(&self, frequency: u64) -> usize {
        self.buckets.get(&frequency).map_or(0, List::len)
    }

    /// Handles in bucket `frequency`, most recent first.
    pub fn bucket<'a, K, V>(
        &self,
        frequency: u64,
        store: &'a EntryStore<K, V>,
    ) -> impl Iterator<Item = Handle> + 'a {
        let list = self.buckets.get(&frequency).copied().unwrap_or_default();
        list.handles(store)
    }

    /// Moves a linked entry from its bucket to the head of the next one.
    ///
    /// # Panics
    ///
    /// Panics if the entry's bucket does not exist, which means the entry
    /// was never admitted.
    pub fn record_access<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        let old = store[handle].frequency();
        let Some(bucket) = self.buckets.get_mut(&old) else {
            panic!("no frequency bucket {} for slot {}", old, handle.index());
        };
        bucket.unlink(store, handle);
        if bucket.is_empty() {
            self.buckets.remove(&old);
            if old == self.min_frequency {
                self.min_frequency = old.saturating_add(1);
            }
        }

        let new = old.saturating_add(1);
        store[handle].set_frequency(new);
        self.buckets
            .entry(new)
            .or_default()
            .push_front(store, handle);
        self.metrics.record_frequency_increment(new);
    }

    /// Links a new entry at the head of bucket 1.
    pub fn insert_new<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        store[handle].set_frequency(1);
        self.buckets.entry(1).or_default().push_front(store, handle);
        self.min_frequency = 1;
        self.len += 1;
    }

    /// Locates the bucket to evict from. Normally `min_frequency`; if two
    /// evictions ran back to back the minimum is stale and gets recomputed.
    fn victim_frequency(&mut self) -> Option<u64> {
        if self.buckets.contains_key(&self.min_frequency) {
            return Some(self.min_frequency);
        }
        let lowest = self.buckets.keys().copied().min()?;
        self.min_frequency = lowest;
        Some(lowest)
    }
}

impl EvictionPolicy for FrequencyOrder {
    const NAME: &'static str = "LFU";

    #[inline]
    fn admit<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        self.insert_new(store, handle);
    }

    #[inline]
    fn promote<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        self.record_access(store, handle);
    }

    fn evict_victim<K, V>(&mut self, store: &mut EntryStore<K, V>) -> Option<Handle> {
        let frequency = self.victim_frequency()?;
        let bucket = self.buckets.get_mut(&frequency)?;
        let victim = bucket.pop_back(store)?;
        if bucket.is_empty() {
            self.buckets.remove(&frequency);
        }
        self.len -= 1;
        self.metrics.record_eviction(frequency);
        Some(victim)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.min_frequency = 1;
        self.len = 0;
    }

    fn extend_metrics(&self, metrics: &mut BTreeMap<String, f64>) {
        self.metrics
            .extend(metrics, self.min_frequency, self.buckets.len());
    }

    fn debug_validate_invariants<K, V>(&self, store: &EntryStore<K, V>) {
        assert_eq!(self.len, store.len(), "bucket total and store disagree");
        if self.len == 0 {
            assert!(self.buckets.is_empty());
            return;
        }

        let lowest = self.buckets.keys().copied().min();
        assert_eq!(lowest, Some(self.min_frequency), "stale min_frequency");

        let mut total = 0usize;
        for (&frequency, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket {} kept", frequency);
            let mut prev = None;
            for handle in bucket.handles(store) {
                let entry = &store[handle];
                assert_eq!(entry.frequency(), frequency);
                assert_eq!(entry.prev, prev);
                prev = Some(handle);
                total += 1;
            }
            assert_eq!(bucket.tail(), prev);
        }
        assert_eq!(total, self.len);
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Cache<K, V, FrequencyOrder, S> {
    /// Access count of `key`, without counting this call as an access.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entry(key).map(|entry| entry.frequency())
    }

    /// Smallest access count among cached keys, or `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.policy().min_frequency())
        }
    }
}
