//! Criterion benchmarks comparing the eviction policies.
//!
//! Covers raw operation cost (hit/miss paths) and steady-state behavior on
//! skewed key streams, for the three cores and the sharded LRU variant.

use std::hint::black_box;
use std::time::Instant;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Zipf};

use evictkit::policy::arc::ArcCache;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::lru_k::LruKCache;
use evictkit::policy::sharded::ShardedLruCache;
use evictkit::traits::CachePolicy;

const CAPACITY: usize = 4096;
const OPS: u64 = 100_000;

// =============================================================================
// Get (cache hit) benchmarks
// =============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("lru", |b| {
        b.iter_custom(|iters| {
            let mut cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.put(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("lfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: LfuCache<u64, u64> = LfuCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.put(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("arc", |b| {
        b.iter_custom(|iters| {
            let mut cache: ArcCache<u64, u64> = ArcCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.put(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// =============================================================================
// Insert (with steady-state eviction) benchmarks
// =============================================================================

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("lru", |b| {
        b.iter_custom(|iters| {
            let mut cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    cache.put(i, i);
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("lfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: LfuCache<u64, u64> = LfuCache::new(CAPACITY);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    cache.put(i, i);
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("arc", |b| {
        b.iter_custom(|iters| {
            let mut cache: ArcCache<u64, u64> = ArcCache::new(CAPACITY);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    cache.put(i, i);
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("lru_k", |b| {
        b.iter_custom(|iters| {
            let mut cache: LruKCache<u64, u64> = LruKCache::new(CAPACITY, CAPACITY);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    cache.put(i, i);
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// =============================================================================
// Zipfian steady state (hit + miss mix)
// =============================================================================

fn bench_zipfian(c: &mut Criterion) {
    let mut group = c.benchmark_group("zipfian_mixed");
    group.throughput(Throughput::Elements(OPS));

    let universe = (CAPACITY * 16) as f64;

    group.bench_function("lru", |b| {
        b.iter_custom(|iters| {
            let mut cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
            let mut rng = SmallRng::seed_from_u64(42);
            let zipf = Zipf::new(universe, 1.0).unwrap();
            let start = Instant::now();
            for _ in 0..iters {
                for _ in 0..OPS {
                    let key = zipf.sample(&mut rng) as u64;
                    if cache.get(&key).is_none() {
                        cache.put(key, key);
                    }
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("lfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: LfuCache<u64, u64> = LfuCache::with_max_avg_freq(CAPACITY, 10);
            let mut rng = SmallRng::seed_from_u64(42);
            let zipf = Zipf::new(universe, 1.0).unwrap();
            let start = Instant::now();
            for _ in 0..iters {
                for _ in 0..OPS {
                    let key = zipf.sample(&mut rng) as u64;
                    if cache.get(&key).is_none() {
                        cache.put(key, key);
                    }
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("arc", |b| {
        b.iter_custom(|iters| {
            let mut cache: ArcCache<u64, u64> = ArcCache::new(CAPACITY);
            let mut rng = SmallRng::seed_from_u64(42);
            let zipf = Zipf::new(universe, 1.0).unwrap();
            let start = Instant::now();
            for _ in 0..iters {
                for _ in 0..OPS {
                    let key = zipf.sample(&mut rng) as u64;
                    if cache.get(&key).is_none() {
                        cache.put(key, key);
                    }
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// =============================================================================
// Sharded throughput (threads on disjoint ranges)
// =============================================================================

fn bench_sharded(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharded_lru");
    group.throughput(Throughput::Elements(OPS));
    group.sample_size(10);

    for &shards in &[1usize, 4, 8] {
        group.bench_function(format!("shards_{shards}"), |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let cache = std::sync::Arc::new(
                        ShardedLruCache::<u64, u64>::try_with_shards(CAPACITY, shards).unwrap(),
                    );
                    let threads = 4u64;
                    let per_thread = OPS / threads;
                    let start = Instant::now();
                    let handles: Vec<_> = (0..threads)
                        .map(|t| {
                            let cache = std::sync::Arc::clone(&cache);
                            std::thread::spawn(move || {
                                let mut rng = SmallRng::seed_from_u64(t);
                                for _ in 0..per_thread {
                                    let key = t * 1_000_000 + (rng.random::<u64>() % 10_000);
                                    if cache.get(&key).is_none() {
                                        cache.put(key, key);
                                    }
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_insert_evict,
    bench_zipfian,
    bench_sharded
);
criterion_main!(benches);
