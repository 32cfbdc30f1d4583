//! Least Recently Used (LRU) replacement policy.
//!
//! One hash index plus one recency list; every access repositions the entry
//! at the MRU end, and overflow evicts from the LRU end.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        LruCache<K, V> Layout                       │
//! │                                                                    │
//! │   index: FxHashMap<K, SlotId>        list: RecencyList<Entry>      │
//! │                                                                    │
//! │   ┌─────────┬────────┐                                             │
//! │   │   Key   │ SlotId │              front ─► [k2,v] ◄──► [k0,v]    │
//! │   ├─────────┼────────┤                        MRU                  │
//! │   │   k0    │  id_0  │──────────────────────────────────┐          │
//! │   │   k2    │  id_2  │─────────────► ...                │          │
//! │   └─────────┴────────┘                                  ▼          │
//! │                                      back ──► [k1,v]  (LRU, evict) │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                               |
//! |------------|------|-------------------------------------|
//! | `get`      | O(1) | detach + splice at MRU              |
//! | `put`      | O(1) | may evict the LRU entry first       |
//! | `contains` | O(1) | index lookup only, no repositioning |
//! | `remove`   | O(1) | index + list removal                |
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in a mutex or use
//! [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache) for
//! concurrent access.

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::traits::{CachePolicy, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LRU cache core: hash index + recency list, all operations O(1).
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CachePolicy;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, "a");
/// cache.put(2, "b");
///
/// // Touch key 1 so key 2 becomes the eviction candidate
/// cache.get(&1);
/// cache.put(3, "c");
///
/// assert_eq!(cache.get(&1), Some(&"a"));
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&3), Some(&"c"));
/// ```
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 creates a no-op cache that admits nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Peeks at the least recently used entry without repositioning it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the value for `key` without updating recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Marks `key` as most recently used without reading its value.
    ///
    /// Returns `true` if the key was resident.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity);
        for (key, &id) in &self.index {
            let entry = self.list.get(id).expect("indexed entry not linked");
            assert!(&entry.key == key);
        }
        self.list.debug_validate_invariants();
    }
}

impl<K, V> CachePolicy<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let entry = self.list.get_mut(id).expect("indexed entry not linked");
            let previous = std::mem::replace(&mut entry.value, value);
            self.list.move_to_front(id);
            return Some(previous);
        }

        if self.capacity == 0 {
            return None;
        }

        if self.list.len() >= self.capacity {
            if let Some(evicted) = self.list.pop_back() {
                self.index.remove(&evicted.key);
            }
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.list.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_insert_and_get() {
        let mut cache = LruCache::new(10);
        assert_eq!(cache.put(1, "one"), None);
        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn lru_overwrite_returns_previous() {
        let mut cache = LruCache::new(10);
        cache.put(1, "one");
        assert_eq!(cache.put(1, "ONE"), Some("one"));
        assert_eq!(cache.get(&1), Some(&"ONE"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut cache = LruCache::new(3);
        for key in 0..3 {
            cache.put(key, key * 10);
        }

        // 0 is the LRU entry
        cache.put(3, 30);
        assert!(!cache.contains(&0));
        assert!(cache.contains(&1));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn lru_get_refreshes_recency() {
        let mut cache = LruCache::new(3);
        for key in 0..3 {
            cache.put(key, key);
        }

        // Refreshing 0 makes 1 the eviction candidate
        cache.get(&0);
        cache.put(3, 3);
        assert!(cache.contains(&0));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn lru_seed_scenario_capacity_two() {
        let mut cache = LruCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.get(&1), Some(&"a"));
        cache.put(3, "c"); // evicts 2, the LRU entry

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&3), Some(&"c"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lru_zero_capacity_is_noop() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.put(1, "x"), None);
        assert_eq!(cache.len(), 0);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn lru_pop_and_peek_lru() {
        let mut cache = LruCache::new(4);
        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.peek_lru(), Some((&1, &"a")));
        assert_eq!(cache.peek_lru(), Some((&1, &"a"))); // peek does not reorder

        assert_eq!(cache.pop_lru(), Some((1, "a")));
        assert_eq!(cache.pop_lru(), Some((2, "b")));
        assert_eq!(cache.pop_lru(), None);
    }

    #[test]
    fn lru_peek_does_not_refresh() {
        let mut cache = LruCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.peek(&1), Some(&"a"));
        cache.put(3, "c"); // 1 still LRU, evicted
        assert!(!cache.contains(&1));
    }

    #[test]
    fn lru_touch_refreshes_without_reading() {
        let mut cache = LruCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");

        assert!(cache.touch(&1));
        assert!(!cache.touch(&99));

        cache.put(3, "c"); // 2 is now the LRU entry
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn lru_remove_and_clear() {
        let mut cache = LruCache::new(4);
        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.remove(&1), Some("a"));
        assert_eq!(cache.remove(&1), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&2));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lru_get_into_writes_out_param() {
        let mut cache = LruCache::new(2);
        cache.put(1, "a".to_string());

        let mut out = String::new();
        assert!(cache.get_into(&1, &mut out));
        assert_eq!(out, "a");
        assert!(!cache.get_into(&9, &mut out));
    }

    #[test]
    fn lru_invariants_under_churn() {
        let mut cache = LruCache::new(8);
        for i in 0..100u64 {
            cache.put(i % 13, i);
            cache.get(&(i % 7));
            if i % 5 == 0 {
                cache.remove(&(i % 13));
            }
            assert!(cache.len() <= 8);
        }
        cache.debug_validate_invariants();
    }
}
