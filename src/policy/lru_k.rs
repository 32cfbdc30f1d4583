//! LRU-k: LRU with a k-access admission filter.
//!
//! A plain LRU cache admits everything, so a one-shot scan can flush the
//! whole working set. LRU-k only admits a key into the main cache after it
//! has been seen `k` times; until then the key lives in a bounded admission
//! history that counts accesses and parks the most recent `put` value.
//!
//! ```text
//!   access(k) ──► resident in main? ──yes──► plain LRU behavior
//!                      │no
//!                      ▼
//!               admission history (bounded LRU of counts + parked value)
//!                      │ count reaches k, value available
//!                      ▼
//!               promote into main (evicting main's LRU if full)
//! ```
//!
//! With `k = 1` the admission filter is pass-through and the cache behaves
//! exactly like [`LruCache`](crate::policy::lru::LruCache).

use std::fmt;
use std::hash::Hash;

use crate::ds::history::{AdmissionHistory, HistoryOutcome};
use crate::error::ConfigError;
use crate::policy::lru::LruCache;
use crate::traits::{CachePolicy, MutableCache};

/// Scan-resistant LRU with a `k`-access promotion threshold.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru_k::LruKCache;
/// use evictkit::traits::CachePolicy;
///
/// let mut cache = LruKCache::new(10, 20); // k defaults to 2
///
/// // First put only parks the value in the admission history
/// cache.put(1, "value");
/// assert!(!cache.contains(&1));
///
/// // Second access reaches k = 2: the key is admitted
/// assert_eq!(cache.get(&1), Some(&"value"));
/// assert!(cache.contains(&1));
/// ```
pub struct LruKCache<K, V> {
    main: LruCache<K, V>,
    history: AdmissionHistory<K, V>,
}

impl<K, V> LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU-k cache with the default threshold `k = 2`.
    ///
    /// `capacity` bounds the main cache; `history_capacity` bounds the
    /// admission history (overflow drops the least recently seen record).
    pub fn new(capacity: usize, history_capacity: usize) -> Self {
        Self {
            main: LruCache::new(capacity),
            history: AdmissionHistory::new(history_capacity, 2),
        }
    }

    /// Creates an LRU-k cache with an explicit promotion threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `k == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru_k::LruKCache;
    ///
    /// let cache = LruKCache::<u64, String>::try_with_k(100, 200, 3).unwrap();
    /// assert_eq!(cache.k_value(), 3);
    ///
    /// assert!(LruKCache::<u64, String>::try_with_k(100, 200, 0).is_err());
    /// ```
    pub fn try_with_k(
        capacity: usize,
        history_capacity: usize,
        k: u32,
    ) -> Result<Self, ConfigError> {
        if k == 0 {
            return Err(ConfigError::new("lru-k promotion threshold k must be >= 1"));
        }
        Ok(Self {
            main: LruCache::new(capacity),
            history: AdmissionHistory::new(history_capacity, k),
        })
    }

    /// Returns the promotion threshold.
    pub fn k_value(&self) -> u32 {
        self.history.threshold()
    }

    /// Returns the number of keys currently tracked in the admission history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the pre-admission access count for `key`, if tracked.
    pub fn pending_accesses(&self, key: &K) -> Option<u32> {
        self.history.accesses(key)
    }

    /// Removes and returns the least recently used resident entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.main.pop_lru()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.main.debug_validate_invariants();
        self.history.debug_validate_invariants();
    }
}

impl<K, V> CachePolicy<K, V> for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.main.contains(&key) {
            return self.main.put(key, value);
        }

        match self.history.record_access(&key, Some(value)) {
            HistoryOutcome::Promoted { value: Some(value) } => {
                self.main.put(key, value);
            }
            HistoryOutcome::Promoted { value: None } | HistoryOutcome::Tracked { .. } => {}
        }
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if self.main.contains(key) {
            return self.main.get(key);
        }

        // Count the access; a parked value admits the key right here.
        if let HistoryOutcome::Promoted { value: Some(value) } =
            self.history.record_access(key, None)
        {
            self.main.put(key.clone(), value);
            return self.main.get(key);
        }
        None
    }

    fn contains(&self, key: &K) -> bool {
        self.main.contains(key)
    }

    fn len(&self) -> usize {
        self.main.len()
    }

    fn capacity(&self) -> usize {
        self.main.capacity()
    }

    fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        // Drop any pending history so the key starts cold if it returns.
        self.history.forget(key);
        self.main.remove(key)
    }
}

impl<K, V> fmt::Debug for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruKCache")
            .field("len", &self.main.len())
            .field("capacity", &self.main.capacity())
            .field("k", &self.history.threshold())
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
