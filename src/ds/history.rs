//! Pre-admission access history for the k-promotion LRU variant.
//!
//! Keys that are not yet resident in the main cache accumulate an access
//! count here, together with the most recent value a `put` supplied for
//! them. Once the count reaches the promotion threshold *and* a value is
//! available, the record is taken out and the key moves into the main
//! cache; a key that qualified through gets alone keeps counting and is
//! carried over by the next `put`.
//!
//! The history itself is a bounded LRU: each access moves the record to the
//! MRU position and overflow drops the least recently touched record
//! (count and deferred value together).

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
struct Record<K, V> {
    key: K,
    accesses: u32,
    deferred: Option<V>,
}

/// Outcome of counting one access against the history.
#[derive(Debug, PartialEq, Eq)]
pub enum HistoryOutcome<V> {
    /// The key has not yet reached the promotion threshold.
    Tracked { accesses: u32 },
    /// The key reached the threshold; its record was removed. Carries the
    /// deferred value if an earlier `put` supplied one.
    Promoted { value: Option<V> },
}

/// Bounded LRU of pre-admission records `(access count, deferred value)`.
#[derive(Debug)]
pub struct AdmissionHistory<K, V> {
    list: RecencyList<Record<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
    threshold: u32,
}

impl<K, V> AdmissionHistory<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a history holding at most `capacity` records with promotion
    /// threshold `threshold` (callers validate `threshold >= 1`).
    pub fn new(capacity: usize, threshold: u32) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::default(),
            capacity,
            threshold,
        }
    }

    /// Returns the promotion threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Returns the number of tracked records.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if no records are tracked.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the access count recorded for `key`, if tracked.
    pub fn accesses(&self, key: &K) -> Option<u32> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|record| record.accesses)
    }

    /// Counts one access against `key`, optionally recording a value.
    ///
    /// A `put` passes `Some(value)` (replacing any earlier deferred value);
    /// a `get` passes `None`. Reaching the threshold promotes only when a
    /// value is available; otherwise counting continues and the record
    /// waits for the next `put` to carry it over.
    pub fn record_access(&mut self, key: &K, value: Option<V>) -> HistoryOutcome<V> {
        if self.capacity == 0 {
            // No room to build up history: a threshold of 1 still promotes
            // immediately, anything higher can never be reached.
            if self.threshold == 1 && value.is_some() {
                return HistoryOutcome::Promoted { value };
            }
            return HistoryOutcome::Tracked { accesses: 0 };
        }

        if let Some(&id) = self.index.get(key) {
            let (accesses, promote) = {
                let record = self.list.get_mut(id).expect("indexed record missing");
                record.accesses = record.accesses.saturating_add(1);
                if let Some(value) = value {
                    record.deferred = Some(value);
                }
                (
                    record.accesses,
                    record.accesses >= self.threshold && record.deferred.is_some(),
                )
            };

            if promote {
                self.index.remove(key);
                let record = self.list.remove(id).expect("indexed record missing");
                return HistoryOutcome::Promoted {
                    value: record.deferred,
                };
            }

            self.list.move_to_front(id);
            return HistoryOutcome::Tracked { accesses };
        }

        // First sighting
        if self.threshold == 1 && value.is_some() {
            return HistoryOutcome::Promoted { value };
        }

        if self.list.len() >= self.capacity {
            if let Some(old) = self.list.pop_back() {
                self.index.remove(&old.key);
            }
        }

        let id = self.list.push_front(Record {
            key: key.clone(),
            accesses: 1,
            deferred: value,
        });
        self.index.insert(key.clone(), id);
        HistoryOutcome::Tracked { accesses: 1 }
    }

    /// Drops the record for `key`, if any.
    pub fn forget(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            self.list.remove(id);
        }
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for record in self.list.iter() {
            // A record at or past the threshold is only waiting for a value.
            if record.accesses >= self.threshold {
                assert!(record.deferred.is_none());
            }
            assert!(self.index.contains_key(&record.key));
        }
        self.list.debug_validate_invariants();
    }
}
