//! Bounded recency list for ghost entries.
//!
//! Tracks recently evicted keys without their values so an adaptive policy
//! can detect re-references to entries it should have kept. Implemented as a
//! [`RecencyList`] of keys plus a hash index for O(1) membership tests.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>      list: RecencyList<K>
//!
//!   "a" ──► id_0                     front ─► [a] ◄──► [b] ◄──► [c] ◄─ back
//!   "b" ──► id_1                              MRU               LRU
//!   "c" ──► id_2
//! ```
//!
//! ## Operations
//!
//! | Operation  | Description                             | Complexity |
//! |------------|-----------------------------------------|------------|
//! | `record`   | Add/promote key to MRU, evict if full   | O(1) avg   |
//! | `contains` | Ghost-hit membership test               | O(1) avg   |
//! | `remove`   | Drop a key after a ghost hit            | O(1) avg   |
//! | `pop_lru`  | Drop the least recently recorded key    | O(1) avg   |
//!
//! A capacity of 0 creates a no-op list that ignores all records.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;

/// Bounded recency list of keys (no values) for ARC-style ghost tracking.
#[derive(Debug)]
pub struct GhostList<K> {
    list: RecencyList<K>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ghost list holding at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::default(),
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if there are no keys tracked.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `key` is present (the ghost-hit check).
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Records `key` as most-recently-seen, evicting the least recent if full.
    ///
    /// Re-recording an existing key promotes it to the MRU position.
    pub fn record(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            return;
        }

        if self.list.len() >= self.capacity {
            if let Some(old_key) = self.list.pop_back() {
                self.index.remove(&old_key);
            }
        }

        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
    }

    /// Removes `key`; returns `true` if it was present.
    ///
    /// Called after a ghost hit so the key is not counted twice.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.list.remove(id);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the least recently recorded key.
    pub fn pop_lru(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for key in self.list.iter() {
            let id = self.index.get(key).expect("listed key missing from index");
            assert_eq!(self.list.get(*id), Some(key));
        }
        self.list.debug_validate_invariants();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_list_records_and_evicts_lru() {
        let mut ghost = GhostList::new(2);

        ghost.record("a");
        ghost.record("b");
        assert!(ghost.contains(&"a"));
        assert!(ghost.contains(&"b"));

        // At capacity: "a" is LRU, evicted
        ghost.record("c");
        assert!(!ghost.contains(&"a"));
        assert!(ghost.contains(&"b"));
        assert!(ghost.contains(&"c"));
        assert_eq!(ghost.len(), 2);
    }

    #[test]
    fn ghost_list_rerecord_promotes_to_mru() {
        let mut ghost = GhostList::new(2);
        ghost.record("a");
        ghost.record("b");

        // "a" becomes MRU, so "b" is the one evicted next
        ghost.record("a");
        ghost.record("c");
        assert!(ghost.contains(&"a"));
        assert!(!ghost.contains(&"b"));
        assert!(ghost.contains(&"c"));
    }

    #[test]
    fn ghost_list_remove_and_pop_lru() {
        let mut ghost = GhostList::new(4);
        ghost.record("a");
        ghost.record("b");
        ghost.record("c");

        assert!(ghost.remove(&"b"));
        assert!(!ghost.remove(&"b"));
        assert_eq!(ghost.len(), 2);

        assert_eq!(ghost.pop_lru(), Some("a"));
        assert_eq!(ghost.pop_lru(), Some("c"));
        assert_eq!(ghost.pop_lru(), None);
        assert!(ghost.is_empty());
    }

    #[test]
    fn ghost_list_zero_capacity_is_noop() {
        let mut ghost = GhostList::new(0);
        ghost.record("a");
        assert!(ghost.is_empty());
        assert!(!ghost.contains(&"a"));
        assert_eq!(ghost.pop_lru(), None);
    }

    #[test]
    fn ghost_list_clear_resets_state() {
        let mut ghost = GhostList::new(4);
        ghost.record("a");
        ghost.record("b");
        ghost.clear();
        assert!(ghost.is_empty());
        assert!(!ghost.contains(&"a"));
        ghost.debug_validate_invariants();
    }

    #[test]
    fn ghost_list_debug_invariants_hold() {
        let mut ghost = GhostList::new(3);
        ghost.record(1);
        ghost.record(2);
        ghost.record(3);
        ghost.record(4);
        ghost.remove(&2);
        ghost.debug_validate_invariants();
    }
}
