//! LRU Cache Metrics

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters kept by the recency ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Promotions that actually relinked an entry.
    pub relinks: u64,

    /// Promotions of an entry that was already most recent.
    pub head_hits: u64,
}

impl LruCacheMetrics {
    #[inline]
    pub fn record_promotion(&mut self, was_head: bool) {
        if was_head {
            self.head_hits += 1;
        } else {
            self.relinks += 1;
        }
    }

    pub fn extend(&self, metrics: &mut BTreeMap<String, f64>) {
        metrics.insert("lru_relinks".to_string(), self.relinks as f64);
        metrics.insert("lru_head_hits".to_string(), self.head_hits as f64);
    }
}
