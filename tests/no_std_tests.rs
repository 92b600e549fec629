#![no_std]
extern crate alloc;
extern crate keycache;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use keycache::{CacheConfig, LfuCache, LruCache};

fn make_lru<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(CacheConfig::new(cap), None)
}

fn make_lfu<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    LfuCache::init(CacheConfig::new(cap), None)
}

#[test]
fn test_lru_in_no_std() {
    let mut cache = make_lru(2);
    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.get(&"a"), Some(&1));
    assert_eq!(cache.put("c", 3), Some(("b", 2)));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_lfu_in_no_std() {
    let mut cache = make_lfu(2);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"b");
    assert_eq!(cache.put("c", 3), Some(("a", 1)));
    assert_eq!(cache.frequency(&"b"), Some(2));
}

#[test]
fn test_alloc_types_as_keys_and_values() {
    let mut cache = make_lfu(3);
    for i in 0..5 {
        let key = format!("key{}", i);
        let value: Vec<u8> = (0..i).collect();
        cache.put(key, value);
    }
    assert_eq!(cache.len(), 3);

    let key = String::from("key4");
    assert_eq!(cache.get(&key).map(Vec::len), Some(4));
    cache.debug_validate_invariants();
}

#[test]
fn test_zero_capacity_in_no_std() {
    let mut cache = make_lru(0);
    assert_eq!(cache.put(1u8, 1u8), Some((1, 1)));
    assert!(cache.is_empty());
}
