//! Simulation runner
//!
//! Replays one request stream against every configured cache at once. Each
//! cache is driven read-through: a `get` that misses is followed by a `put`
//! of the same key, as a caching proxy in front of a backend would do.

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use keycache::metrics::CacheMetrics;
use keycache::{ConcurrentLfuCache, ConcurrentLruCache, LfuCache, LruCache, PolicyKind};
use tracing::{debug, info};

use crate::input::{collect_traces, RequestIterator, TraceError};
use crate::models::{
    CacheMode, PolicyStats, Request, SimulationConfig, SimulationKey, SimulationResult,
};

const PROGRESS_INTERVAL: u64 = 100_000;

/// The caches a run can drive. Values are object sizes.
enum CacheWrapper {
    LruSeq(LruCache<String, u64>),
    LfuSeq(LfuCache<String, u64>),
    LruConc(ConcurrentLruCache<String, u64>),
    LfuConc(ConcurrentLfuCache<String, u64>),
}

impl CacheWrapper {
    fn new(key: SimulationKey, capacity: usize) -> Self {
        match (key.policy, key.mode) {
            (PolicyKind::Lru, CacheMode::Sequential) => Self::LruSeq(LruCache::new(capacity)),
            (PolicyKind::Lfu, CacheMode::Sequential) => Self::LfuSeq(LfuCache::new(capacity)),
            (PolicyKind::Lru, CacheMode::Concurrent) => {
                Self::LruConc(ConcurrentLruCache::new(capacity))
            }
            (PolicyKind::Lfu, CacheMode::Concurrent) => {
                Self::LfuConc(ConcurrentLfuCache::new(capacity))
            }
        }
    }

    /// Looks the request up and fills the cache on a miss. Returns `true`
    /// on a hit.
    #[inline]
    fn access(&mut self, request: &Request) -> bool {
        let key = request.key.as_str();
        let hit = match self {
            Self::LruSeq(cache) => cache.get(key).is_some(),
            Self::LfuSeq(cache) => cache.get(key).is_some(),
            Self::LruConc(cache) => cache.get(key).is_some(),
            Self::LfuConc(cache) => cache.get(key).is_some(),
        };
        if !hit {
            let (key, size) = (request.key.clone(), request.size);
            match self {
                Self::LruSeq(cache) => {
                    cache.put(key, size);
                }
                Self::LfuSeq(cache) => {
                    cache.put(key, size);
                }
                Self::LruConc(cache) => {
                    cache.put(key, size);
                }
                Self::LfuConc(cache) => {
                    cache.put(key, size);
                }
            }
        }
        hit
    }

    fn metrics(&self) -> BTreeMap<String, f64> {
        match self {
            Self::LruSeq(cache) => cache.metrics(),
            Self::LfuSeq(cache) => cache.metrics(),
            Self::LruConc(cache) => cache.metrics(),
            Self::LfuConc(cache) => cache.metrics(),
        }
    }
}

/// Runs a configured simulation.
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Streams the configured trace files through every cache.
    pub fn run(&self) -> Result<SimulationResult, TraceError> {
        let traces = collect_traces(&self.config.inputs)?;
        info!(files = traces.len(), "replaying traces");
        self.run_requests(RequestIterator::new(traces))
    }

    /// Replays an arbitrary request stream. Stops at the first error.
    pub fn run_requests<I>(&self, requests: I) -> Result<SimulationResult, TraceError>
    where
        I: IntoIterator<Item = Result<Request, TraceError>>,
    {
        let started = Instant::now();
        let mut caches: Vec<(SimulationKey, CacheWrapper, PolicyStats)> = self
            .config
            .keys()
            .into_iter()
            .map(|key| {
                (
                    key,
                    CacheWrapper::new(key, self.config.capacity),
                    PolicyStats::default(),
                )
            })
            .collect();

        let mut unique = HashSet::new();
        let mut total_requests = 0u64;
        let mut total_bytes = 0u64;

        for request in requests {
            let request = request?;
            for (_, cache, stats) in caches.iter_mut() {
                let op_start = Instant::now();
                let hit = cache.access(&request);
                stats.cache_time += op_start.elapsed();
                stats.record(hit, request.size);
            }

            total_requests += 1;
            total_bytes += request.size;
            if !unique.contains(&request.key) {
                unique.insert(request.key);
            }
            if total_requests % PROGRESS_INTERVAL == 0 {
                debug!(requests = total_requests, "simulation progress");
            }
        }

        let stats = caches
            .into_iter()
            .map(|(key, cache, mut stats)| {
                stats.evictions = cache
                    .metrics()
                    .get("evictions")
                    .copied()
                    .unwrap_or_default() as u64;
                (key, stats)
            })
            .collect();

        let result = SimulationResult {
            stats,
            total_requests,
            total_bytes,
            unique_objects: unique.len(),
            duration: started.elapsed(),
            capacity: self.config.capacity,
        };
        info!(
            requests = result.total_requests,
            unique = result.unique_objects,
            elapsed_ms = result.duration.as_millis() as u64,
            "simulation finished"
        );
        Ok(result)
    }
}
