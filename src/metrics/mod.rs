//! Cache Metrics
//!
//! Every cache keeps a [`CoreCacheMetrics`] for the counters all policies
//! share, and its ordering policy appends its own entries on top. Both are
//! reported through the [`CacheMetrics`] trait as a `BTreeMap`, so keys come
//! out in a stable order and runs can be compared line by line.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;
pub mod lru;

pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;

/// Counters common to every eviction policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Number of `get`/`get_mut` calls.
    pub requests: u64,

    /// Requests that found their key.
    pub cache_hits: u64,

    /// New keys stored by `put`.
    pub insertions: u64,

    /// `put` calls that overwrote an existing key.
    pub updates: u64,

    /// Entries removed to make room for a new key.
    pub evictions: u64,

    /// `put` calls dropped because the cache has zero capacity.
    pub rejected: u64,
}

impl CoreCacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Misses are derived as `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of requests that hit, in `0.0..=1.0`. Zero before any request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of requests that missed, in `0.0..=1.0`. Zero before any request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Reports the counters together with the cache's current occupancy.
    ///
    /// `utilization` is `len / capacity`, or zero for a zero-capacity cache.
    pub fn to_btreemap(&self, len: usize, capacity: usize) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("rejected".to_string(), self.rejected as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("len".to_string(), len as f64);
        metrics.insert("capacity".to_string(), capacity as f64);
        let utilization = if capacity > 0 {
            len as f64 / capacity as f64
        } else {
            0.0
        };
        metrics.insert("utilization".to_string(), utilization);

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics interface over every cache type in this crate.
pub trait CacheMetrics {
    /// All metrics as name/value pairs, sorted by name.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short policy name, e.g. `"LRU"` or `"LFU"`.
    fn algorithm_name(&self) -> &'static str;
}
