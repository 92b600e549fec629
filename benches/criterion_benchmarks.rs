use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keycache::{CacheConfig, LfuCache, LruCache};

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    LruCache::init(CacheConfig::new(cap), None)
}

fn make_lfu<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    LfuCache::init(CacheConfig::new(cap), None)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    // LRU benchmarks
    {
        let mut cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        let mut next = CACHE_SIZE;
        group.bench_function("LRU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    // LFU benchmarks
    {
        let mut cache = make_lfu(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LFU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LFU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LFU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        // Fresh keys all land at frequency 1, so each eviction hits the
        // minimum bucket directly.
        let mut next = CACHE_SIZE;
        group.bench_function("LFU put evicting", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
