//! LFU Cache Metrics
//!
//! Frequency statistics kept by the frequency ordering alongside its buckets.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters kept by the frequency ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LfuCacheMetrics {
    /// Every hit or update moves one entry up one frequency level.
    pub total_frequency_increments: u64,

    /// Highest frequency any entry has reached since construction or `clear`.
    pub max_frequency: u64,

    /// Evicted entries whose frequency was above 1.
    pub evicted_after_reuse: u64,
}

impl LfuCacheMetrics {
    #[inline]
    pub fn record_frequency_increment(&mut self, new_frequency: u64) {
        self.total_frequency_increments += 1;
        if new_frequency > self.max_frequency {
            self.max_frequency = new_frequency;
        }
    }

    #[inline]
    pub fn record_eviction(&mut self, victim_frequency: u64) {
        if victim_frequency > 1 {
            self.evicted_after_reuse += 1;
        }
    }

    /// Appends the LFU entries. `min_frequency` and `levels` describe the
    /// bucket map at the time of the call.
    pub fn extend(&self, metrics: &mut BTreeMap<String, f64>, min_frequency: u64, levels: usize) {
        metrics.insert("min_frequency".to_string(), min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("active_frequency_levels".to_string(), levels as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "evicted_after_reuse".to_string(),
            self.evicted_after_reuse as f64,
        );
    }
}
