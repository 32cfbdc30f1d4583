//! Unified cache builder over all eviction policies.
//!
//! Wraps the policy cores in one enum-dispatch type so call sites can pick
//! a policy at runtime without generics or trait objects.
//!
//! ## Example
//!
//! ```
//! use evictkit::builder::{CacheBuilder, EvictionPolicy};
//! use evictkit::traits::CachePolicy;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .try_build::<u64, String>(EvictionPolicy::Arc)
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LruKCache;
use crate::traits::{CachePolicy, MutableCache};

/// Available eviction policies.
#[derive(Debug, Clone)]
pub enum EvictionPolicy {
    /// Least Recently Used eviction.
    Lru,
    /// k-promotion LRU with a bounded admission history.
    LruK { history_capacity: usize, k: u32 },
    /// Least Frequently Used eviction; `max_avg_freq == 0` disables aging.
    Lfu { max_avg_freq: u64 },
    /// Adaptive Replacement Cache.
    Arc,
}

/// Uniform cache wrapper dispatching to the selected policy core.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    LruK(LruKCache<K, V>),
    Lfu(LfuCache<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> CachePolicy<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::LruK(lru_k) => lru_k.put(key, value),
            CacheInner::Lfu(lfu) => lfu.put(key, value),
            CacheInner::Arc(arc) => arc.put(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::LruK(lru_k) => lru_k.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
            CacheInner::Arc(arc) => arc.get(key),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::LruK(lru_k) => lru_k.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
            CacheInner::Arc(arc) => arc.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::LruK(lru_k) => lru_k.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::Arc(arc) => arc.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::LruK(lru_k) => lru_k.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::Arc(arc) => arc.capacity(),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::LruK(lru_k) => lru_k.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::Arc(arc) => arc.clear(),
        }
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::LruK(lru_k) => lru_k.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
            CacheInner::Arc(arc) => arc.remove(key),
        }
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match &self.inner {
            CacheInner::Lru(_) => "lru",
            CacheInner::LruK(_) => "lru-k",
            CacheInner::Lfu(_) => "lfu",
            CacheInner::Arc(_) => "arc",
        };
        f.debug_struct("Cache").field("policy", &policy).finish()
    }
}

/// Builder for creating cache instances.
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Creates a builder for caches holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache with the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid policy parameters
    /// (currently only `LruK { k: 0, .. }`).
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::builder::{CacheBuilder, EvictionPolicy};
    ///
    /// let lru = CacheBuilder::new(100).try_build::<u64, String>(EvictionPolicy::Lru);
    /// assert!(lru.is_ok());
    ///
    /// let bad = CacheBuilder::new(100).try_build::<u64, String>(EvictionPolicy::LruK {
    ///     history_capacity: 200,
    ///     k: 0,
    /// });
    /// assert!(bad.is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: EvictionPolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            EvictionPolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            EvictionPolicy::LruK {
                history_capacity,
                k,
            } => CacheInner::LruK(LruKCache::try_with_k(self.capacity, history_capacity, k)?),
            EvictionPolicy::Lfu { max_avg_freq } => {
                CacheInner::Lfu(LfuCache::with_max_avg_freq(self.capacity, max_avg_freq))
            }
            EvictionPolicy::Arc => CacheInner::Arc(ArcCache::new(self.capacity)),
        };

        Ok(Cache { inner })
    }
}
