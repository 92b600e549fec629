//! Cache Configuration Module
//!
//! Configuration structs have public fields for simple instantiation and are
//! passed to the `init` constructors of [`Cache`](crate::Cache) and
//! [`ConcurrentCache`](crate::concurrent::ConcurrentCache).
//!
//! # Capacity
//!
//! `capacity` is the maximum number of live entries. A capacity of zero is
//! valid and yields a cache that never stores anything: every `put` is a
//! no-op and every `get` misses.
//!
//! Callers holding a signed value (parsed from a file, an FFI boundary, a
//! command line) should go through [`CacheConfig::try_from_signed`], which
//! rejects negative capacities before a cache is ever built.
//!
//! # Examples
//!
//! ```
//! use keycache::config::{CacheConfig, PolicyKind};
//! use keycache::LfuCache;
//!
//! let config = CacheConfig { capacity: 1000 };
//! let cache: LfuCache<String, Vec<u8>> = LfuCache::init(config, None);
//! assert_eq!(cache.cap(), 1000);
//!
//! let policy: PolicyKind = "LFU".parse().unwrap();
//! assert_eq!(policy, PolicyKind::Lfu);
//! ```

use crate::error::{ConfigError, Result};
use alloc::string::ToString;
use core::fmt;
use core::num::NonZeroUsize;
use core::str::FromStr;

/// Configuration for a bounded cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a configuration with the given entry capacity.
    #[inline]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Validates a signed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeCapacity`] for values below zero and
    /// [`ConfigError::CapacityTooLarge`] when the value does not fit `usize`.
    pub fn try_from_signed(capacity: i64) -> Result<Self> {
        if capacity < 0 {
            return Err(ConfigError::NegativeCapacity(capacity));
        }
        usize::try_from(capacity)
            .map(Self::new)
            .map_err(|_| ConfigError::CapacityTooLarge(capacity))
    }

    /// Returns the capacity as a `NonZeroUsize`, for callers that need a cache
    /// able to hold at least one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn non_zero(self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(ConfigError::ZeroCapacity)
    }
}

/// The eviction policies shipped with this crate.
///
/// Used where the policy is chosen at runtime, e.g. from a command line.
/// Statically typed code picks [`LruCache`](crate::LruCache) or
/// [`LfuCache`](crate::LfuCache) directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    /// Least Recently Used.
    Lru,
    /// Least Frequently Used, ties broken by recency.
    Lfu,
}

impl PolicyKind {
    /// Short upper-case name, matching `CacheMetrics::algorithm_name`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "LRU",
            PolicyKind::Lfu => "LFU",
        }
    }

    /// All policies, in a stable order.
    pub const fn all() -> [PolicyKind; 2] {
        [PolicyKind::Lru, PolicyKind::Lfu]
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("lru") {
            Ok(PolicyKind::Lru)
        } else if name.eq_ignore_ascii_case("lfu") {
            Ok(PolicyKind::Lfu)
        } else {
            Err(ConfigError::UnknownPolicy(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_config_creation() {
        let config = CacheConfig { capacity: 100 };
        assert_eq!(config, CacheConfig::new(100));
        assert_eq!(config.non_zero().unwrap().get(), 100);
    }

    #[test]
    fn test_config_rejects_negative_capacity() {
        assert_eq!(
            CacheConfig::try_from_signed(-1),
            Err(ConfigError::NegativeCapacity(-1))
        );
        assert_eq!(CacheConfig::try_from_signed(0), Ok(CacheConfig::new(0)));
        assert_eq!(CacheConfig::try_from_signed(7), Ok(CacheConfig::new(7)));
    }

    #[test]
    fn test_zero_capacity_is_valid_but_not_non_zero() {
        let config = CacheConfig::new(0);
        assert_eq!(config.non_zero(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("lru".parse::<PolicyKind>(), Ok(PolicyKind::Lru));
        assert_eq!(" Lfu ".parse::<PolicyKind>(), Ok(PolicyKind::Lfu));
        assert_eq!(
            "slru".parse::<PolicyKind>(),
            Err(ConfigError::UnknownPolicy("slru".to_string()))
        );
        assert_eq!(PolicyKind::Lfu.to_string(), "LFU");
        assert_eq!(PolicyKind::all(), [PolicyKind::Lru, PolicyKind::Lfu]);
    }
}
