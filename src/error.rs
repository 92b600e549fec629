//! Error types for cache construction.
//!
//! Runtime operations on a constructed cache are total: a lookup miss is a
//! plain `None`, and `put` never fails. The only fallible step is turning
//! caller-supplied configuration into a [`CacheConfig`](crate::config::CacheConfig)
//! or a [`PolicyKind`](crate::config::PolicyKind).
//!
//! ```
//! use keycache::config::CacheConfig;
//! use keycache::error::ConfigError;
//!
//! assert_eq!(
//!     CacheConfig::try_from_signed(-1),
//!     Err(ConfigError::NegativeCapacity(-1))
//! );
//! ```

use alloc::string::String;
use thiserror::Error;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A signed capacity below zero was supplied.
    #[error("cache capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),

    /// A signed capacity does not fit the platform's `usize`.
    #[error("cache capacity {0} does not fit in usize")]
    CapacityTooLarge(i64),

    /// The caller requires a cache that can hold at least one entry.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,

    /// An eviction policy name that is neither `lru` nor `lfu`.
    #[error("unknown eviction policy `{0}` (expected `lru` or `lfu`)")]
    UnknownPolicy(String),
}

/// Result type alias for configuration operations.
pub type Result<T> = core::result::Result<T, ConfigError>;
