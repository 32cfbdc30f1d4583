//! # Cache Trait Hierarchy
//!
//! Defines the uniform capability every eviction policy in this crate
//! satisfies, so callers can swap LRU, LFU and ARC (and their sharded
//! variants) without touching call sites.
//!
//! ## Architecture
//!
//! ```text
//!                ┌──────────────────────────────────────────┐
//!                │           CachePolicy<K, V>              │
//!                │                                          │
//!                │  put(&mut, K, V) → Option<V>             │
//!                │  get(&mut, &K) → Option<&V>              │
//!                │  get_into(&mut, &K, &mut V) → bool       │
//!                │  contains(&, &K) → bool                  │
//!                │  len / is_empty / capacity / clear       │
//!                └────────────────────┬─────────────────────┘
//!                                     │
//!                                     ▼
//!                ┌──────────────────────────────────────────┐
//!                │           MutableCache<K, V>             │
//!                │                                          │
//!                │  remove(&K) → Option<V>                  │
//!                └──────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees common to all implementations
//!
//! - After `put(k, v)`, `get(&k)` returns `v` until an intervening
//!   `put(k, _)`, `remove(&k)` or policy eviction of `k`.
//! - Resident entries never exceed the configured capacity; capacity 0
//!   makes every `put` a no-op.
//! - `get` on a hit updates whatever bookkeeping the policy uses
//!   (recency, frequency, ARC promotion); `contains` never does.
//! - All operations are O(1) expected amortized.
//!
//! ## Thread Safety
//!
//! Cores are single-threaded (`&mut self`); concurrent access goes through
//! the sharded wrappers in [`crate::policy::sharded`], which serialize each
//! shard behind its own mutex.

/// Core operations every eviction policy supports.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use evictkit::traits::CachePolicy;
/// use evictkit::policy::lru::LruCache;
///
/// fn warm_cache<C: CachePolicy<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CachePolicy<K, V> {
    /// Inserts or updates a key, returning the previous value on update.
    ///
    /// At capacity, an entry is evicted according to the policy before the
    /// new entry is admitted. With capacity 0 the call is a no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CachePolicy;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.put(1, "first"), None);
    /// assert_eq!(cache.put(1, "second"), Some("first"));
    /// ```
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// A hit updates the policy's bookkeeping (recency position, access
    /// count, ARC list membership). Use [`contains`](Self::contains) to
    /// test existence without affecting eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CachePolicy;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.put(1, "value");
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Out-parameter form of [`get`](Self::get): writes the value into
    /// `out` and returns `true` on a hit.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CachePolicy;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.put(1, "value".to_string());
    ///
    /// let mut out = String::new();
    /// assert!(cache.get_into(&1, &mut out));
    /// assert_eq!(out, "value");
    /// assert!(!cache.get_into(&99, &mut out));
    /// ```
    fn get_into(&mut self, key: &K, out: &mut V) -> bool
    where
        V: Clone,
    {
        match self.get(key) {
            Some(value) => {
                out.clone_from(value);
                true
            }
            None => false,
        }
    }

    /// Checks if a key is resident without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Removes all entries (and any ghost/history bookkeeping).
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CachePolicy, MutableCache};
/// use evictkit::policy::lru::LruCache;
///
/// fn invalidate<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// cache.put(1, "one".to_string());
/// cache.put(2, "two".to_string());
///
/// invalidate(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CachePolicy<K, V> {
    /// Removes a specific entry, returning its value if it was resident.
    fn remove(&mut self, key: &K) -> Option<V>;
}
