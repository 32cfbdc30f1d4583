//! Frequency-bucketed key tracking for LFU with a min-frequency cursor.
//!
//! Buckets are keyed by access count and linked in ascending order; each
//! bucket is an intrusive list of entries inside one shared arena. Within a
//! bucket the head is the newest arrival and the tail the oldest, so
//! `pop_min` evicts the oldest entry of the least-frequent bucket in O(1).

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Entry<K> {
    key: K,
    freq: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Tracks per-key access counts with O(1) increment and min-eviction.
///
/// Values are not stored here; the owning cache keeps them in its own index
/// keyed by `K`.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_freq: u64,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the access count for `key`, if tracked.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Returns the smallest non-empty bucket key, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        if self.min_freq == 0 {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Returns the next eviction candidate without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        if self.min_freq == 0 {
            return None;
        }
        let bucket = self.buckets.get(&self.min_freq)?;
        let id = bucket.tail?;
        let entry = self.entries.get(id)?;
        Some((&entry.key, entry.freq))
    }

    /// Starts tracking `key` at frequency 1. Returns `false` if already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            key: key.clone(),
            freq: 1,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = if self.min_freq == 0 {
                None
            } else {
                Some(self.min_freq)
            };
            self.insert_bucket(1, None, next);
        }

        self.list_push_front(1, id);
        self.min_freq = 1;
        true
    }

    /// Increments the count for `key` and repositions it; returns the new count.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let current_freq = self.entries.get(id)?.freq;
        if current_freq == u64::MAX {
            // Saturated: refresh position within the bucket only.
            self.list_remove(current_freq, id)?;
            self.list_push_front(current_freq, id);
            return Some(current_freq);
        }
        let next_freq = current_freq + 1;

        let (prev_freq, next_existing) = {
            let bucket = self.buckets.get(&current_freq)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(current_freq, id)?;
        let bucket_empty = self.bucket_is_empty(current_freq);

        if bucket_empty {
            self.remove_bucket(current_freq, prev_freq, next_existing);
            if self.min_freq == current_freq {
                self.min_freq = next_existing.unwrap_or(0);
            }
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if bucket_empty {
                prev_freq
            } else {
                Some(current_freq)
            };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);
        if self.min_freq == 0 || next_freq < self.min_freq {
            self.min_freq = next_freq;
        }

        Some(next_freq)
    }

    /// Stops tracking `key`; returns its final count.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let freq = self.entries.get(id)?.freq;

        self.list_remove(freq, id)?;
        let bucket_empty = self.bucket_is_empty(freq);
        let (prev, next) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next)
        };

        if bucket_empty {
            self.remove_bucket(freq, prev, next);
            if self.min_freq == freq {
                self.min_freq = next.unwrap_or(0);
            }
        }

        self.entries.remove(id).map(|entry| entry.freq)
    }

    /// Removes and returns the oldest entry of the least-frequent bucket.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let freq = self.min_freq;
        if freq == 0 {
            return None;
        }

        let id = self.buckets.get(&freq)?.tail?;
        self.list_remove(freq, id)?;
        let bucket_empty = self.bucket_is_empty(freq);
        let (prev, next) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next)
        };

        if bucket_empty {
            self.remove_bucket(freq, prev, next);
            if self.min_freq == freq {
                self.min_freq = next.unwrap_or(0);
            }
        }

        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.freq))
    }

    /// Halves every count (floor, minimum 1) and rebuilds the bucket chain.
    ///
    /// Within-bucket age order is preserved, and entries from lower old
    /// buckets land nearer the eviction end of any merged bucket. Returns
    /// the new sum of all counts.
    pub fn halve_frequencies(&mut self) -> u64 {
        if self.is_empty() {
            return 0;
        }

        // Eviction order: ascending frequency, oldest first within a bucket.
        let mut order: Vec<SlotId> = Vec::with_capacity(self.len());
        let mut freq_cursor = Some(self.min_freq);
        while let Some(freq) = freq_cursor {
            let bucket = self.buckets.get(&freq).expect("bucket chain broken");
            let next_bucket = bucket.next;
            let mut current = bucket.tail;
            while let Some(id) = current {
                order.push(id);
                current = self.entries.get(id).and_then(|entry| entry.prev);
            }
            freq_cursor = next_bucket;
        }

        self.buckets.clear();
        self.min_freq = 0;

        // Old frequencies were ascending, so halved ones are non-decreasing
        // and the chain can be rebuilt by appending buckets.
        let mut total = 0u64;
        let mut last_bucket: Option<u64> = None;
        for id in order {
            let new_freq = {
                let entry = self.entries.get_mut(id).expect("ordered entry missing");
                entry.freq = (entry.freq / 2).max(1);
                entry.prev = None;
                entry.next = None;
                entry.freq
            };
            total += new_freq;

            if last_bucket != Some(new_freq) {
                self.insert_bucket(new_freq, last_bucket, None);
                last_bucket = Some(new_freq);
                if self.min_freq == 0 {
                    self.min_freq = new_freq;
                }
            }
            self.list_push_front(new_freq, id);
        }

        total
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            assert_eq!(self.min_freq, 0);
            return;
        }

        assert!(self.min_freq > 0);
        assert!(self.buckets.contains_key(&self.min_freq));

        for (&freq, bucket) in &self.buckets {
            assert!(bucket.head.is_some());
            assert!(bucket.tail.is_some());
            if let Some(prev) = bucket.prev {
                assert!(prev < freq);
                assert!(self.buckets.contains_key(&prev));
                assert_eq!(self.buckets[&prev].next, Some(freq));
            } else {
                assert_eq!(self.min_freq, freq);
            }
            if let Some(next) = bucket.next {
                assert!(next > freq);
                assert!(self.buckets.contains_key(&next));
                assert_eq!(self.buckets[&next].prev, Some(freq));
            }

            let mut current = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(id) = current {
                let entry = self.entries.get(id).expect("bucket entry missing");
                assert_eq!(entry.freq, freq);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&id));
                last = Some(id);
                current = entry.next;
                count += 1;
            }
            assert_eq!(bucket.tail, last);
            assert!(count > 0);
        }
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .map(|bucket| bucket.head.is_none())
            .unwrap_or(true)
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );

        if let Some(prev) = prev
            && let Some(prev_bucket) = self.buckets.get_mut(&prev)
        {
            prev_bucket.next = Some(freq);
        }
        if let Some(next) = next
            && let Some(next_bucket) = self.buckets.get_mut(&next)
        {
            next_bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev) = prev
            && let Some(prev_bucket) = self.buckets.get_mut(&prev)
        {
            prev_bucket.next = next;
        }
        if let Some(next) = next
            && let Some(next_bucket) = self.buckets.get_mut(&next)
        {
            next_bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let bucket = self.buckets.get_mut(&freq).expect("bucket missing");

        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(entry) = self.entries.get_mut(old_head) {
                entry.prev = Some(id);
            }
        } else {
            bucket.tail = Some(id);
        }
        bucket.head = Some(id);
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        if let Some(prev) = prev {
            if let Some(entry) = self.entries.get_mut(prev) {
                entry.next = next;
            }
        } else {
            bucket.head = next;
        }
        if let Some(next) = next {
            if let Some(entry) = self.entries.get_mut(next) {
                entry.prev = prev;
            }
        } else {
            bucket.tail = prev;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }

        Some(())
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
