//! Cache Engine
//!
//! [`Cache`] ties together the three structures that make up a bounded cache:
//!
//! ```text
//!   KeyIndex            EntryStore                 EvictionPolicy
//!   key ──► Handle ───► [key, value, freq, ◄►] ◄── ordering links
//! ```
//!
//! Every public operation updates all three before it returns, so no caller
//! can observe a key that is indexed but not ordered or the reverse.
//!
//! The policy parameter picks the eviction rule. The crate ships two, exposed
//! as aliases: [`LruCache`](crate::LruCache) and [`LfuCache`](crate::LfuCache).
//!
//! # Capacity
//!
//! `len() <= cap()` holds after every call. A cache built with capacity zero
//! never stores anything: `put` hands the pair straight back and every `get`
//! misses.

use crate::config::CacheConfig;
use crate::entry::{Entry, EntryStore};
use crate::index::KeyIndex;
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::policy::EvictionPolicy;
use crate::DefaultHashBuilder;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use tracing::{debug, trace};

/// Upper bound on slots reserved up front. Larger caches grow on demand.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

/// A bounded key-value cache evicting according to `P`.
///
/// Keys must be `Hash + Eq`; `put` additionally needs `K: Clone` because the
/// key is held by both the index and the entry. Values are moved in and
/// never cloned by the cache itself.
pub struct Cache<K, V, P, S = DefaultHashBuilder> {
    config: CacheConfig,
    index: KeyIndex<K, S>,
    store: EntryStore<K, V>,
    policy: P,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq, V, P: EvictionPolicy> Cache<K, V, P, DefaultHashBuilder> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use keycache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.cap(), 2);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::init(CacheConfig::new(capacity), None)
    }

    /// Creates a cache from a configuration and an optional hasher.
    pub fn init(config: CacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_config(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, P: EvictionPolicy, S: BuildHasher> Cache<K, V, P, S> {
    /// Creates a cache that hashes keys with `hash_builder`.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_config(CacheConfig::new(capacity), hash_builder)
    }

    fn with_config(config: CacheConfig, hash_builder: S) -> Self {
        let reserved = config.capacity.min(MAX_PREALLOCATED_ENTRIES);
        debug!(policy = P::NAME, capacity = config.capacity, "creating cache");
        Cache {
            config,
            index: KeyIndex::with_capacity_and_hasher(reserved, hash_builder),
            store: EntryStore::with_capacity(reserved),
            policy: P::default(),
            metrics: CoreCacheMetrics::new(),
        }
    }

    /// Returns `true` if `key` is cached. Does not count as an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains(key)
    }

    /// Returns the value for `key` without promoting it or touching metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.lookup(key).map(|handle| self.store.read(handle))
    }

    /// Returns the value for `key` and records the access with the policy.
    ///
    /// A miss leaves every entry untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(handle) = self.index.lookup(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.metrics.record_hit();
        self.policy.promote(&mut self.store, handle);
        Some(self.store.read(handle))
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(handle) = self.index.lookup(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.metrics.record_hit();
        self.policy.promote(&mut self.store, handle);
        Some(self.store.read_mut(handle))
    }

    /// Inserts or updates `key`.
    ///
    /// Returns whatever pair no longer lives in the cache afterwards:
    ///
    /// - the key with its previous value when `key` was already cached (the
    ///   update counts as an access, exactly like a `get` hit),
    /// - the evicted pair when a new key needed room,
    /// - the given pair itself when the capacity is zero,
    /// - `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use keycache::LruCache;
    ///
    /// let mut cache = LruCache::new(1);
    /// assert_eq!(cache.put(1, "a"), None);
    /// assert_eq!(cache.put(1, "b"), Some((1, "a")));
    /// assert_eq!(cache.put(2, "c"), Some((1, "b")));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if self.config.capacity == 0 {
            self.metrics.record_rejection();
            return Some((key, value));
        }

        if let Some(handle) = self.index.lookup(&key) {
            let old = self.store.write(handle, value);
            self.policy.promote(&mut self.store, handle);
            self.metrics.record_update();
            return Some((key, old));
        }

        let evicted = if self.store.len() >= self.config.capacity {
            Some(self.evict())
        } else {
            None
        };

        let handle = self.store.create(key.clone(), value);
        self.index.insert(key, handle);
        self.policy.admit(&mut self.store, handle);
        self.metrics.record_insertion();
        evicted
    }

    fn evict(&mut self) -> (K, V) {
        let Some(victim) = self.policy.evict_victim(&mut self.store) else {
            panic!(
                "{} ordering is empty while the index holds {} entries (capacity {})",
                P::NAME,
                self.index.len(),
                self.config.capacity
            );
        };
        let Entry {
            key,
            value,
            frequency,
            ..
        } = self.store.destroy(victim);
        let removed = self.index.remove(&key);
        debug_assert_eq!(removed, Some(victim));
        self.metrics.record_eviction();
        trace!(policy = P::NAME, frequency, "evicted entry");
        (key, value)
    }

    /// Drops every entry. Capacity, hasher and metrics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.store.clear();
        self.policy.clear();
    }

    /// Checks that index, store and ordering agree, panicking otherwise.
    /// Walks every entry.
    pub fn debug_validate_invariants(&self) {
        assert!(
            self.store.len() <= self.config.capacity,
            "{} entries exceed capacity {}",
            self.store.len(),
            self.config.capacity
        );
        assert_eq!(self.index.len(), self.store.len());
        for (handle, entry) in self.store.iter() {
            assert_eq!(self.index.lookup(&entry.key), Some(handle));
        }
        self.policy.debug_validate_invariants(&self.store);
    }

    /// Live entry for `key`, without promotion.
    pub(crate) fn entry<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.lookup(key).and_then(|handle| self.store.get(handle))
    }
}

impl<K, V, P, S> Cache<K, V, P, S> {
    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub(crate) fn policy(&self) -> &P {
        &self.policy
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &EntryStore<K, V> {
        &self.store
    }
}

impl<K, V, P: EvictionPolicy, S> CacheMetrics for Cache<K, V, P, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap(self.len(), self.cap());
        self.policy.extend_metrics(&mut metrics);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        P::NAME
    }
}

impl<K, V, P: EvictionPolicy, S> fmt::Debug for Cache<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &P::NAME)
            .field("capacity", &self.config.capacity)
            .field("len", &self.store.len())
            .finish()
    }
}
