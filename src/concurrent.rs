//! Thread-safe cache wrapper.
//!
//! [`ConcurrentCache`] serializes every operation on one
//! [`parking_lot::Mutex`] around a [`Cache`]. Each `get` or `put` runs as a
//! single critical section, so the index, the store and the ordering are
//! never seen half updated.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │           ConcurrentCache            │
//! │  ┌────────────────────────────────┐  │
//! │  │             Mutex              │  │
//! │  │  ┌──────────────────────────┐  │  │
//! │  │  │ Cache<K, V, P, S>        │  │  │
//! │  │  │ index · store · ordering │  │  │
//! │  │  └──────────────────────────┘  │  │
//! │  └────────────────────────────────┘  │
//! └──────────────────────────────────────┘
//! ```
//!
//! The key space is not striped across segments. An eviction reads and
//! rewrites the global ordering (for LFU, the bucket map together with the
//! minimum frequency), and per-segment orderings would evict a different key
//! than the single-threaded cache does for the same history.
//!
//! Values leave the lock as clones. Use [`ConcurrentCache::get_with`] to
//! inspect a value in place without cloning it.
//!
//! # Example
//!
//! ```
//! use keycache::concurrent::ConcurrentLfuCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache: Arc<ConcurrentLfuCache<u32, u32>> = Arc::new(ConcurrentLfuCache::new(1_000));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.put(t * 100 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 400);
//! ```

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::lfu::FrequencyOrder;
use crate::lru::RecencyOrder;
use crate::metrics::CacheMetrics;
use crate::policy::EvictionPolicy;
use crate::DefaultHashBuilder;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

/// Thread-safe LRU cache.
pub type ConcurrentLruCache<K, V, S = DefaultHashBuilder> = ConcurrentCache<K, V, RecencyOrder, S>;

/// Thread-safe LFU cache.
pub type ConcurrentLfuCache<K, V, S = DefaultHashBuilder> =
    ConcurrentCache<K, V, FrequencyOrder, S>;

/// A [`Cache`] behind a single lock. `Send + Sync` whenever `K`, `V` and `S`
/// are `Send`, so it can be shared through an `Arc`.
pub struct ConcurrentCache<K, V, P, S = DefaultHashBuilder> {
    inner: Mutex<Cache<K, V, P, S>>,
}

impl<K: Hash + Eq, V, P: EvictionPolicy> ConcurrentCache<K, V, P, DefaultHashBuilder> {
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(Cache::new(capacity))
    }

    pub fn init(config: CacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::from_cache(Cache::init(config, hasher))
    }
}

impl<K: Hash + Eq, V, P: EvictionPolicy, S: BuildHasher> ConcurrentCache<K, V, P, S> {
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_cache(Cache::with_hasher(capacity, hash_builder))
    }

    /// Wraps an existing cache, keeping its entries and metrics.
    pub fn from_cache(cache: Cache<K, V, P, S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Unwraps the lock and returns the inner cache.
    pub fn into_inner(self) -> Cache<K, V, P, S> {
        self.inner.into_inner()
    }

    pub fn cap(&self) -> usize {
        self.inner.lock().cap()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns a clone of the value for `key`, promoting it.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Promotes `key` and applies `f` to its value while the lock is held.
    ///
    /// `f` must not call back into this cache; the lock is not reentrant.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Promotes `key` and lets `f` modify its value in place.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.lock().get_mut(key).map(f)
    }

    /// Inserts or updates `key`. Returns the displaced pair, as
    /// [`Cache::put`] does.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.inner.lock().put(key, value)
    }

    /// Returns `true` if `key` is cached, without promoting it.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs [`Cache::debug_validate_invariants`] under the lock.
    pub fn debug_validate_invariants(&self) {
        self.inner.lock().debug_validate_invariants();
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentCache<K, V, FrequencyOrder, S> {
    /// Access count of `key`, without promoting it.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().frequency(key)
    }
}

impl<K, V, P: EvictionPolicy, S> CacheMetrics for ConcurrentCache<K, V, P, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        P::NAME
    }
}

impl<K, V, P: EvictionPolicy, S> fmt::Debug for ConcurrentCache<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}
