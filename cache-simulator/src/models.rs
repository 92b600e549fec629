// Data models for cache simulation

use keycache::PolicyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One access in a trace. Serialized as `timestamp,key,size`; extra columns
/// in input files are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unix seconds
    pub timestamp: u64,
    pub key: String,
    /// Object size in bytes
    pub size: u64,
}

impl Request {
    pub fn new(timestamp: u64, key: impl Into<String>, size: u64) -> Self {
        Self {
            timestamp,
            key: key.into(),
            size,
        }
    }
}

/// Cache execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheMode {
    /// Plain `LruCache` / `LfuCache`
    Sequential,
    /// The same cache behind `ConcurrentCache`'s lock
    Concurrent,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Sequential => "Sequential",
            CacheMode::Concurrent => "Concurrent",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one simulated cache: a policy in a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimulationKey {
    pub policy: PolicyKind,
    pub mode: CacheMode,
}

impl SimulationKey {
    pub fn new(policy: PolicyKind, mode: CacheMode) -> Self {
        Self { policy, mode }
    }
}

impl fmt::Display for SimulationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.policy, self.mode)
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Trace files, replayed in order
    pub inputs: Vec<PathBuf>,
    /// Cache capacity in entries
    pub capacity: usize,
    pub policies: Vec<PolicyKind>,
    pub modes: Vec<CacheMode>,
}

impl SimulationConfig {
    /// Every policy/mode combination, in a stable order.
    pub fn keys(&self) -> Vec<SimulationKey> {
        let mut keys = Vec::with_capacity(self.policies.len() * self.modes.len());
        for &policy in &self.policies {
            for &mode in &self.modes {
                keys.push(SimulationKey::new(policy, mode));
            }
        }
        keys.sort();
        keys.dedup();
        keys
    }
}

/// Counters for one simulated cache.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PolicyStats {
    pub hits: u64,
    pub misses: u64,
    pub bytes_hit: u64,
    pub bytes_miss: u64,
    /// Read from the cache's own metrics at the end of the run
    pub evictions: u64,
    /// Time spent inside cache calls, excluding trace I/O
    pub cache_time: Duration,
}

impl PolicyStats {
    pub fn record(&mut self, hit: bool, size: u64) {
        if hit {
            self.hits += 1;
            self.bytes_hit += size;
        } else {
            self.misses += 1;
            self.bytes_miss += size;
        }
    }

    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.requests())
    }

    /// Byte hit rate as a percentage
    pub fn byte_hit_rate(&self) -> f64 {
        percent(self.bytes_hit, self.bytes_hit + self.bytes_miss)
    }

    /// Average nanoseconds per cache call
    pub fn avg_ns(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.cache_time.as_nanos() as f64 / requests as f64
        } else {
            0.0
        }
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total > 0 {
        part as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Results of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub stats: BTreeMap<SimulationKey, PolicyStats>,
    pub total_requests: u64,
    pub total_bytes: u64,
    pub unique_objects: usize,
    pub duration: Duration,
    pub capacity: usize,
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub policy: String,
    pub mode: String,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub byte_hit_rate: f64,
    pub evictions: u64,
    pub avg_ns: f64,
}
