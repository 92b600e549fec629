//! Concurrent Cache Correctness Tests
//!
//! The concurrent wrappers take one lock per call, so any interleaving of
//! whole operations must leave the cache in a state the single-threaded
//! cache could also reach.
//!
//! ## Segments
//!
//! 1. **Policy Correctness**: eviction choices match the sequential caches
//! 2. **Thread Safety Invariants**: capacity and consistency under contention

#![cfg(feature = "concurrent")]

use keycache::metrics::CacheMetrics;
use keycache::{ConcurrentLfuCache, ConcurrentLruCache, LfuCache, LruCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// ============================================================================
// SEGMENT 1: POLICY CORRECTNESS
// ============================================================================

#[test]
fn test_concurrent_lru_evicts_like_sequential() {
    let shared: ConcurrentLruCache<i32, i32> = ConcurrentLruCache::new(3);
    let mut local = LruCache::new(3);
    let ops = [1, 2, 3, 1, 4, 2, 5, 1, 6];

    for key in ops {
        let shared_hit = shared.get(&key);
        let local_hit = local.get(&key).copied();
        assert_eq!(shared_hit, local_hit);
        if shared_hit.is_none() {
            assert_eq!(shared.put(key, key * 10), local.put(key, key * 10));
        }
    }
    assert_eq!(shared.len(), local.len());
}

#[test]
fn test_concurrent_lfu_evicts_lowest_frequency() {
    let cache: ConcurrentLfuCache<&str, i32> = ConcurrentLfuCache::new(2);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"a");
    cache.get(&"a");

    assert_eq!(cache.put("c", 3), Some(("b", 2)));
    assert_eq!(cache.frequency(&"a"), Some(3));
    assert_eq!(cache.put("d", 4), Some(("c", 3)));
}

#[test]
fn test_lfu_hot_key_survives_concurrent_scans() {
    let cache: Arc<ConcurrentLfuCache<u32, u32>> = Arc::new(ConcurrentLfuCache::new(8));
    cache.put(0, 0);
    for _ in 0..100 {
        cache.get(&0);
    }

    let mut pool = scoped_threadpool::Pool::new(4);
    pool.scoped(|scope| {
        for t in 0..4u32 {
            let cache = Arc::clone(&cache);
            scope.execute(move || {
                for i in 0..500 {
                    let key = 1 + t * 1_000 + i;
                    cache.put(key, i);
                }
            });
        }
    });

    assert!(cache.contains(&0), "hot key was evicted by one-off keys");
    assert_eq!(cache.len(), 8);
    cache.debug_validate_invariants();
}

// ============================================================================
// SEGMENT 2: THREAD SAFETY INVARIANTS
// ============================================================================

#[test]
fn test_capacity_holds_under_contention() {
    let cache: Arc<ConcurrentLruCache<u64, u64>> = Arc::new(ConcurrentLruCache::new(50));
    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..2_000u64 {
                    let key = (t * 7 + i * 13) % 200;
                    if cache.get(&key).is_none() {
                        cache.put(key, i);
                    }
                    assert!(cache.len() <= 50);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 50);
    cache.debug_validate_invariants();
    let metrics = cache.metrics();
    assert_eq!(metrics["requests"], 16_000.0);
    assert_eq!(
        metrics["cache_hits"] + metrics["cache_misses"],
        metrics["requests"]
    );
}

#[test]
fn test_every_displaced_pair_is_reported_once() {
    let cache: Arc<ConcurrentLfuCache<u32, u32>> = Arc::new(ConcurrentLfuCache::new(16));
    let evicted = Arc::new(AtomicUsize::new(0));

    let mut pool = scoped_threadpool::Pool::new(4);
    pool.scoped(|scope| {
        for t in 0..4u32 {
            let cache = Arc::clone(&cache);
            let evicted = Arc::clone(&evicted);
            scope.execute(move || {
                for i in 0..250u32 {
                    // Keys are disjoint per thread, so every Some is an eviction.
                    if cache.put(t * 10_000 + i, i).is_some() {
                        evicted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    let evicted = evicted.load(Ordering::Relaxed);
    assert_eq!(evicted, 1_000 - 16);
    assert_eq!(cache.metrics()["evictions"] as usize, evicted);
    assert_eq!(cache.len(), 16);
}

#[test]
fn test_get_mut_with_is_atomic() {
    let cache: Arc<ConcurrentLruCache<&'static str, u64>> = Arc::new(ConcurrentLruCache::new(4));
    cache.put("counter", 0);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    cache.get_mut_with(&"counter", |v| *v += 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.get(&"counter"), Some(4_000));
}

#[test]
fn test_into_inner_keeps_state() {
    let shared: ConcurrentLfuCache<u8, u8> = ConcurrentLfuCache::new(2);
    shared.put(1, 1);
    shared.get(&1);
    let cache: LfuCache<u8, u8> = shared.into_inner();
    assert_eq!(cache.frequency(&1), Some(2));
    assert_eq!(cache.metrics()["cache_hits"], 1.0);
}
