#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Slot arena holding every live entry, addressed by stable handles.
///
/// The ordering structures link entries through indices into this arena
/// instead of raw pointers.
pub mod entry;

/// Intrusive doubly linked list over the entry arena.
///
/// Shared by the LRU recency sequence and the LFU frequency buckets.
pub mod list;

pub(crate) mod index;

/// Cache configuration structures.
pub mod config;

/// Error types returned while validating configuration.
pub mod error;

/// The trait an ordering structure implements to drive eviction.
pub mod policy;

/// The cache engine shared by every eviction policy.
pub mod cache;

/// Least Recently Used (LRU) ordering and the [`LruCache`] alias.
pub mod lru;

/// Least Frequently Used (LFU) ordering with recency tie-breaks and the
/// [`LfuCache`] alias.
pub mod lfu;

/// Cache metrics system.
///
/// Every cache reports core counters plus policy-specific values through
/// the [`CacheMetrics`](metrics::CacheMetrics) trait.
pub mod metrics;

/// Thread-safe wrapper serializing access through a single lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

/// Hasher used when none is supplied.
#[cfg(feature = "hashbrown")]
pub type DefaultHashBuilder = hashbrown::DefaultHashBuilder;

/// Hasher used when none is supplied.
#[cfg(not(feature = "hashbrown"))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

pub use cache::Cache;
pub use config::{CacheConfig, PolicyKind};
pub use error::ConfigError;
pub use lfu::{FrequencyOrder, LfuCache};
pub use lru::{LruCache, RecencyOrder};
pub use metrics::CacheMetrics;
pub use policy::EvictionPolicy;

#[cfg(feature = "concurrent")]
pub use concurrent::{ConcurrentCache, ConcurrentLfuCache, ConcurrentLruCache};
