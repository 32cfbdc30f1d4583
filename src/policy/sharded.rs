//! Sharded cache compositions for concurrent access.
//!
//! A sharded cache is `N` independent single-threaded cores, each behind
//! its own mutex, with a deterministic selector routing every key to
//! exactly one shard. The router holds no lock; an operation acquires one
//! shard mutex on entry and releases it before returning, so there is no
//! lock ordering to get wrong and no cross-shard operation at all.
//!
//! ```text
//!             ShardSelector (hash(key) → shard)
//!                  │
//!    ┌─────────────┼─────────────┬─────────────┐
//!    ▼             ▼             ▼             ▼
//! Mutex<core₀> Mutex<core₁> Mutex<core₂> Mutex<core₃>
//! ```
//!
//! Per-shard capacity is `ceil(capacity / shards)`, so the total resident
//! bound is at least the requested capacity. Ordering is per-shard only:
//! operations on one shard serialize on its mutex; across shards there is
//! no ordering guarantee.
//!
//! ## Variants
//!
//! - [`ShardedLruCache`]: N independent LRU cores
//! - [`ShardedLfuCache`]: N independent LFU cores (optional aging)
//! - [`ShardedArcCache`]: N independent ARC cores, each with its own `p`

use parking_lot::Mutex;
use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::ds::shard::ShardSelector;
use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CachePolicy, MutableCache};

/// Default shard count: one per available CPU.
pub fn default_shard_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// `N` independent cache cores behind per-shard mutexes.
///
/// Construct through the policy-specific aliases ([`ShardedLruCache`],
/// [`ShardedLfuCache`], [`ShardedArcCache`]).
pub struct ShardedCache<C> {
    shards: Vec<Mutex<C>>,
    selector: ShardSelector,
}

impl<C> ShardedCache<C> {
    fn from_cores(cores: Vec<C>) -> Self {
        let selector = ShardSelector::new(cores.len(), 0);
        Self {
            shards: cores.into_iter().map(Mutex::new).collect(),
            selector,
        }
    }

    fn shard_for<K: Hash>(&self, key: &K) -> &Mutex<C> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Inserts or updates a key in its shard, returning the replaced value.
    pub fn put<K, V>(&self, key: K, value: V) -> Option<V>
    where
        C: CachePolicy<K, V>,
        K: Hash,
    {
        self.shard_for(&key).lock().put(key, value)
    }

    /// Gets a clone of the value for `key`, updating shard bookkeeping.
    pub fn get<K, V>(&self, key: &K) -> Option<V>
    where
        C: CachePolicy<K, V>,
        K: Hash,
        V: Clone,
    {
        self.shard_for(key).lock().get(key).cloned()
    }

    /// Out-parameter form of [`get`](Self::get); returns `true` on a hit.
    pub fn get_into<K, V>(&self, key: &K, out: &mut V) -> bool
    where
        C: CachePolicy<K, V>,
        K: Hash,
        V: Clone,
    {
        self.shard_for(key).lock().get_into(key, out)
    }

    /// Checks residency without updating access state.
    pub fn contains<K, V>(&self, key: &K) -> bool
    where
        C: CachePolicy<K, V>,
        K: Hash,
    {
        self.shard_for(key).lock().contains(key)
    }

    /// Removes an entry from its shard.
    pub fn remove<K, V>(&self, key: &K) -> Option<V>
    where
        C: MutableCache<K, V>,
        K: Hash,
    {
        self.shard_for(key).lock().remove(key)
    }

    /// Returns the total number of resident entries across shards.
    ///
    /// Each shard is locked in turn, so the total is not a snapshot of a
    /// single instant under concurrent writes.
    pub fn len<K, V>(&self) -> usize
    where
        C: CachePolicy<K, V>,
    {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Returns `true` if every shard is empty.
    pub fn is_empty<K, V>(&self) -> bool
    where
        C: CachePolicy<K, V>,
    {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Returns the summed capacity of all shards (≥ the requested total).
    pub fn capacity<K, V>(&self) -> usize
    where
        C: CachePolicy<K, V>,
    {
        self.shards
            .iter()
            .map(|shard| shard.lock().capacity())
            .sum()
    }

    /// Returns the resident count of every shard.
    pub fn shard_lens<K, V>(&self) -> Vec<usize>
    where
        C: CachePolicy<K, V>,
    {
        self.shards.iter().map(|shard| shard.lock().len()).collect()
    }

    /// Clears every shard.
    pub fn clear<K, V>(&self)
    where
        C: CachePolicy<K, V>,
    {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }

    /// Runs `f` on each shard core in turn (diagnostics and tests).
    pub fn for_each_shard<F>(&self, mut f: F)
    where
        F: FnMut(&mut C),
    {
        for shard in &self.shards {
            f(&mut shard.lock());
        }
    }
}

impl<C> std::fmt::Debug for ShardedCache<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedCache")
            .field("shards", &self.shards.len())
            .finish_non_exhaustive()
    }
}

fn validate_shard_count(shard_count: usize) -> Result<usize, ConfigError> {
    if shard_count == 0 {
        return Err(ConfigError::new("shard count must be >= 1"));
    }
    Ok(shard_count)
}

fn per_shard_capacity(capacity: usize, shard_count: usize) -> usize {
    capacity.div_ceil(shard_count)
}

/// N independent LRU cores selected by key hash.
pub type ShardedLruCache<K, V> = ShardedCache<LruCache<K, V>>;

impl<K, V> ShardedCache<LruCache<K, V>>
where
    K: Eq + Hash + Clone,
{
    /// Creates a sharded LRU cache with one shard per available CPU.
    pub fn new(capacity: usize) -> Self {
        let shards = default_shard_count();
        let per_shard = per_shard_capacity(capacity, shards);
        Self::from_cores((0..shards).map(|_| LruCache::new(per_shard)).collect())
    }

    /// Creates a sharded LRU cache with an explicit shard count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `shard_count == 0`.
    pub fn try_with_shards(capacity: usize, shard_count: usize) -> Result<Self, ConfigError> {
        let shards = validate_shard_count(shard_count)?;
        let per_shard = per_shard_capacity(capacity, shards);
        Ok(Self::from_cores(
            (0..shards).map(|_| LruCache::new(per_shard)).collect(),
        ))
    }
}

/// N independent LFU cores selected by key hash.
pub type ShardedLfuCache<K, V> = ShardedCache<LfuCache<K, V>>;

impl<K, V> ShardedCache<LfuCache<K, V>>
where
    K: Eq + Hash + Clone,
{
    /// Creates a sharded LFU cache with one shard per available CPU and
    /// aging disabled.
    pub fn new(capacity: usize) -> Self {
        let shards = default_shard_count();
        let per_shard = per_shard_capacity(capacity, shards);
        Self::from_cores(
            (0..shards)
                .map(|_| LfuCache::with_max_avg_freq(per_shard, 0))
                .collect(),
        )
    }

    /// Creates a sharded LFU cache with an explicit shard count and aging
    /// trigger (`max_avg_freq == 0` disables decay; each shard ages
    /// independently).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `shard_count == 0`.
    pub fn try_with_shards(
        capacity: usize,
        shard_count: usize,
        max_avg_freq: u64,
    ) -> Result<Self, ConfigError> {
        let shards = validate_shard_count(shard_count)?;
        let per_shard = per_shard_capacity(capacity, shards);
        Ok(Self::from_cores(
            (0..shards)
                .map(|_| LfuCache::with_max_avg_freq(per_shard, max_avg_freq))
                .collect(),
        ))
    }
}

/// N independent ARC cores selected by key hash, each with its own `p`.
pub type ShardedArcCache<K, V> = ShardedCache<ArcCache<K, V>>;

impl<K, V> ShardedCache<ArcCache<K, V>>
where
    K: Eq + Hash + Clone,
{
    /// Creates a sharded ARC cache with one shard per available CPU.
    pub fn new(capacity: usize) -> Self {
        let shards = default_shard_count();
        let per_shard = per_shard_capacity(capacity, shards);
        Self::from_cores((0..shards).map(|_| ArcCache::new(per_shard)).collect())
    }

    /// Creates a sharded ARC cache with an explicit shard count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `shard_count == 0`.
    pub fn try_with_shards(capacity: usize, shard_count: usize) -> Result<Self, ConfigError> {
        let shards = validate_shard_count(shard_count)?;
        let per_shard = per_shard_capacity(capacity, shards);
        Ok(Self::from_cores(
            (0..shards).map(|_| ArcCache::new(per_shard)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharded_lru_routes_and_serves() {
        let cache = ShardedLruCache::try_with_shards(100, 4).unwrap();
        assert_eq!(cache.shard_count(), 4);

        for key in 0..50u64 {
            cache.put(key, key * 10);
        }
        for key in 0..50u64 {
            assert_eq!(cache.get(&key), Some(key * 10));
        }
        assert_eq!(cache.len(), 50);
    }

    #[test]
    fn sharded_capacity_is_split_with_ceiling() {
        let cache = ShardedLruCache::<u64, u64>::try_with_shards(100, 4).unwrap();
        // 100 / 4 = 25 per shard
        assert_eq!(cache.capacity(), 100);

        let uneven = ShardedLruCache::<u64, u64>::try_with_shards(10, 3).unwrap();
        // ceil(10 / 3) = 4 per shard
        assert_eq!(uneven.capacity(), 12);
    }

    #[test]
    fn sharded_residents_bounded_per_shard() {
        let cache = ShardedLruCache::try_with_shards(100, 4).unwrap();
        for key in 0..1000u64 {
            cache.put(key, key);
        }

        assert!(cache.len() <= 100);
        for len in cache.shard_lens() {
            assert!(len <= 25, "shard over per-shard capacity: {len}");
        }
    }

    #[test]
    fn sharded_zero_shards_rejected() {
        assert!(ShardedLruCache::<u64, u64>::try_with_shards(100, 0).is_err());
        assert!(ShardedLfuCache::<u64, u64>::try_with_shards(100, 0, 0).is_err());
        assert!(ShardedArcCache::<u64, u64>::try_with_shards(100, 0).is_err());
    }

    #[test]
    fn sharded_default_shard_count_is_positive() {
        assert!(default_shard_count() >= 1);
        let cache = ShardedLruCache::<u64, u64>::new(64);
        assert_eq!(cache.shard_count(), default_shard_count());
    }

    #[test]
    fn sharded_lfu_evicts_low_frequency_within_shard() {
        let cache = ShardedLfuCache::try_with_shards(4, 1, 0).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache.put(4, "d");
        cache.get(&1);
        cache.get(&2);
        cache.get(&3);

        cache.put(5, "e"); // evicts 4, the only freq-1 entry
        assert!(!cache.contains(&4));
        assert!(cache.contains(&1));
    }

    #[test]
    fn sharded_arc_serves_and_bounds() {
        let cache = ShardedArcCache::try_with_shards(64, 4).unwrap();
        for key in 0..500u64 {
            cache.put(key, key);
            cache.get(&(key / 2));
        }
        assert!(cache.len() <= cache.capacity());
        cache.for_each_shard(|core| core.debug_validate_invariants());
    }

    #[test]
    fn sharded_remove_and_clear() {
        let cache = ShardedLruCache::try_with_shards(16, 2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.remove(&1), Some("a"));
        assert_eq!(cache.remove(&1), None);
        assert!(!cache.contains(&1));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn sharded_get_into_clones_under_lock() {
        let cache = ShardedLruCache::try_with_shards(16, 2).unwrap();
        cache.put(1, "a".to_string());

        let mut out = String::new();
        assert!(cache.get_into(&1, &mut out));
        assert_eq!(out, "a");
        assert!(!cache.get_into(&2, &mut out));
    }

    #[test]
    fn sharded_cache_is_shareable_across_threads() {
        use std::sync::Arc;

        let cache = Arc::new(ShardedLruCache::try_with_shards(64, 4).unwrap());
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100u64 {
                        cache.put(t * 1000 + i, i);
                        cache.get(&(t * 1000 + i / 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= cache.capacity());
    }
}
