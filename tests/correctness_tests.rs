//! Correctness Tests for Cache Policies
//!
//! Validates eviction behaviour with small caches and deterministic access
//! patterns. Every put that can evict checks exactly which pair came back.
//!
//! ## Test Strategy
//! - Capacities of 0 to 4 entries
//! - The canonical LRU/LFU scenarios, then longer hand-traced sequences
//! - `debug_validate_invariants` after each sequence

use keycache::config::CacheConfig;
use keycache::metrics::CacheMetrics;
use keycache::{ConfigError, LfuCache, LruCache};
use std::hash::Hash;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

fn make_lru<K: Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(CacheConfig { capacity: cap }, None)
}

fn make_lfu<K: Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    LfuCache::init(CacheConfig { capacity: cap }, None)
}

// ============================================================================
// CANONICAL SCENARIOS
// ============================================================================

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.get(&1), Some(&1));

    assert_eq!(cache.put(3, 3), Some((2, 2)), "key 2 should be evicted");
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(&3));
    cache.debug_validate_invariants();
}

#[test]
fn test_lfu_evicts_lower_frequency() {
    let mut cache = make_lfu(2);
    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.get(&1), Some(&1));
    assert_eq!(cache.frequency(&1), Some(2));
    assert_eq!(cache.frequency(&2), Some(1));

    assert_eq!(cache.put(3, 3), Some((2, 2)), "key 2 has the lower frequency");
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&1), Some(&1));
    assert_eq!(cache.get(&3), Some(&3));
    cache.debug_validate_invariants();
}

#[test]
fn test_lfu_tie_break_evicts_older_insertion() {
    let mut cache = make_lfu(2);
    cache.put(1, 10);
    cache.put(2, 20);

    assert_eq!(cache.put(3, 30), Some((1, 10)), "equal frequency falls back to recency");
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(&20));
    assert_eq!(cache.get(&3), Some(&30));
    cache.debug_validate_invariants();
}

#[test]
fn test_lfu_update_counts_as_access() {
    let mut cache = make_lfu(2);
    assert_eq!(cache.put(1, 1), None);
    assert_eq!(cache.put(1, 2), Some((1, 1)));
    cache.put(2, 2);

    assert_eq!(cache.put(3, 3), Some((2, 2)), "key 1 survives on its update");
    assert_eq!(cache.peek(&1), Some(&2));
    cache.debug_validate_invariants();
}

#[test]
fn test_lru_update_counts_as_access() {
    let mut cache = make_lru(2);
    cache.put(1, 1);
    cache.put(1, 2);
    cache.put(2, 2);

    // The update touched key 1 before key 2 was inserted, so 1 is older.
    assert_eq!(cache.put(3, 3), Some((1, 2)));
    assert!(cache.contains(&2));
    assert!(cache.contains(&3));
}

#[test]
fn test_capacity_zero_never_stores() {
    let mut lru = make_lru(0);
    let mut lfu = make_lfu(0);
    for _ in 0..3 {
        assert_eq!(lru.put(1, 1), Some((1, 1)));
        assert_eq!(lru.get(&1), None);
        assert_eq!(lfu.put(1, 1), Some((1, 1)));
        assert_eq!(lfu.get(&1), None);
    }
    assert_eq!(lru.len(), 0);
    assert_eq!(lfu.len(), 0);
    assert_eq!(lfu.min_frequency(), None);
}

#[test]
fn test_negative_capacity_is_rejected() {
    assert_eq!(
        CacheConfig::try_from_signed(-5),
        Err(ConfigError::NegativeCapacity(-5))
    );
}

// ============================================================================
// LRU SEQUENCES
// ============================================================================

#[test]
fn test_lru_first_inserted_goes_first() {
    let mut cache = make_lru(3);
    for i in 1..=3 {
        cache.put(i, i * 10);
    }
    assert_eq!(cache.put(4, 40), Some((1, 10)));
    assert_eq!(cache.put(5, 50), Some((2, 20)));
    assert_eq!(cache.put(6, 60), Some((3, 30)));
    cache.debug_validate_invariants();
}

#[test]
fn test_lru_get_protects_while_older_entries_remain() {
    let mut cache = make_lru(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    cache.get(&"a");

    assert_eq!(cache.put("d", 4), Some(("b", 2)));
    assert_eq!(cache.put("e", 5), Some(("c", 3)));
    // Now "a" is the oldest entry left.
    assert_eq!(cache.put("f", 6), Some(("a", 1)));
}

#[test]
fn test_lru_peek_and_contains_do_not_promote() {
    let mut cache = make_lru(2);
    cache.put(1, "one");
    cache.put(2, "two");
    assert_eq!(cache.peek(&1), Some(&"one"));
    assert!(cache.contains(&1));

    assert_eq!(cache.put(3, "three"), Some((1, "one")));
}

#[test]
fn test_lru_get_mut_promotes() {
    let mut cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    *cache.get_mut(&1).unwrap() += 100;

    assert_eq!(cache.put(3, 3), Some((2, 2)));
    assert_eq!(cache.get(&1), Some(&101));
}

// ============================================================================
// LFU SEQUENCES
// ============================================================================

#[test]
fn test_lfu_most_accessed_key_survives() {
    let mut cache = make_lfu(3);
    cache.put("hot", 0);
    for _ in 0..5 {
        cache.get(&"hot");
    }
    for i in 0..20 {
        cache.put(if i % 2 == 0 { "x" } else { "y" }, i);
        cache.put("z", i);
        assert!(cache.contains(&"hot"), "hot key evicted at step {i}");
    }
    cache.debug_validate_invariants();
}

#[test]
fn test_lfu_scan_does_not_flush_frequent_keys() {
    let mut lfu = make_lfu(3);
    let mut lru = make_lru(3);
    for cache_key in ["a", "b"] {
        lfu.put(cache_key, 0);
        lru.put(cache_key, 0);
        lfu.get(&cache_key);
        lru.get(&cache_key);
    }
    for key in ["s1", "s2", "s3", "s4"] {
        lfu.put(key, 1);
        lru.put(key, 1);
    }

    assert!(lfu.contains(&"a") && lfu.contains(&"b"));
    assert!(!lru.contains(&"a") && !lru.contains(&"b"));
}

#[test]
fn test_lfu_tie_break_follows_last_touch_not_insertion() {
    let mut cache = make_lfu(3);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);
    cache.get(&3);
    cache.get(&1);
    cache.get(&2);
    // Every key is at frequency 2; key 3 reached it first.
    assert_eq!(cache.put(4, 4), Some((3, 3)));
    // Key 4 is alone at frequency 1.
    assert_eq!(cache.put(5, 5), Some((4, 4)));
}

#[test]
fn test_lfu_min_frequency_resets_after_eviction() {
    let mut cache = make_lfu(1);
    cache.put(1, 1);
    cache.get(&1);
    cache.get(&1);
    assert_eq!(cache.min_frequency(), Some(3));

    assert_eq!(cache.put(2, 2), Some((1, 1)));
    assert_eq!(cache.min_frequency(), Some(1));
    assert_eq!(cache.put(3, 3), Some((2, 2)));
    cache.debug_validate_invariants();
}

// ============================================================================
// SHARED BEHAVIOUR
// ============================================================================

#[test]
fn test_miss_is_idempotent() {
    let mut lru = make_lru(2);
    let mut lfu = make_lfu(2);
    lru.put(1, 1);
    lfu.put(1, 1);
    for _ in 0..10 {
        assert_eq!(lru.get(&42), None);
        assert_eq!(lfu.get(&42), None);
    }
    assert_eq!(lru.len(), 1);
    assert_eq!(lfu.len(), 1);
    assert_eq!(lfu.frequency(&1), Some(1));
}

#[test]
fn test_metrics_track_hits_and_evictions() {
    let mut cache = make_lfu(2);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.get(&1);
    cache.get(&3);
    cache.put(1, 10);
    cache.put(3, 3);

    let metrics = cache.metrics();
    assert_eq!(metrics["requests"], 2.0);
    assert_eq!(metrics["cache_hits"], 1.0);
    assert_eq!(metrics["cache_misses"], 1.0);
    assert_eq!(metrics["insertions"], 3.0);
    assert_eq!(metrics["updates"], 1.0);
    assert_eq!(metrics["evictions"], 1.0);
    assert_eq!(metrics["utilization"], 1.0);
}
