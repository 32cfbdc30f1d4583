//! Adaptive Replacement Cache (ARC) policy.
//!
//! ARC balances recency against frequency automatically by splitting the
//! cache into four lists and steering a single adaptation target between
//! them based on ghost-list hits.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        ArcCache<K, V> Layout                        │
//! │                                                                     │
//! │   index: FxHashMap<K, (ListKind, SlotId)>   (residents only)        │
//! │                                                                     │
//! │   T1 (seen once, recency)          T2 (seen ≥ twice, frequency)     │
//! │   ┌──────────────────────┐         ┌──────────────────────┐         │
//! │   │ MRU            LRU   │         │ MRU            LRU   │         │
//! │   │ [new] ◄──► [older]──┼──evict──►│ [hot] ◄──► [cooler]──┼──evict─┐│
//! │   └──────────────────────┘    │    └──────────────────────┘        ││
//! │                               ▼                                    ▼│
//! │   B1 (ghost keys from T1)          B2 (ghost keys from T2)          │
//! │   ┌──────────────────────┐         ┌──────────────────────┐         │
//! │   │ keys only, no values │         │ keys only, no values │         │
//! │   └──────────────────────┘         └──────────────────────┘         │
//! │                                                                     │
//! │   p: target size of T1, 0 ≤ p ≤ c                                   │
//! │   • hit in B1 → p grows   (T1 was evicted too aggressively)         │
//! │   • hit in B2 → p shrinks (T2 deserved the space)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Cases (in order)
//!
//! 1. Key in T1/T2: move to T2 MRU (promotion); `put` also swaps the value.
//! 2. Key in B1: grow `p` by `max(1, |B2|/|B1|)`, make room, admit to T2.
//! 3. Key in B2: shrink `p` by `max(1, |B1|/|B2|)`, make room, admit to T2.
//! 4. Full miss: trim the recency side per the directory bounds, make room,
//!    admit to T1.
//!
//! The replacement primitive evicts T1's LRU into B1 when `|T1| > p` (or
//! `|T1| == p` on a B2 hit), otherwise T2's LRU into B2.
//!
//! ## Invariants
//!
//! - `|T1| + |T2| ≤ c` and key sets of all four lists are disjoint
//! - `|T1| + |B1| ≤ c`
//! - `|T1| + |T2| + |B1| + |B2| ≤ 2c`
//! - `p ∈ [0, c]`
//!
//! All checked by `debug_validate_invariants()` in debug/test builds.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement
//!   Cache", FAST 2003

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

use crate::ds::ghost_list::GhostList;
use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::traits::{CachePolicy, MutableCache};

/// Which resident list an entry is linked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    T1,
    T2,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Adaptive Replacement Cache core.
///
/// # Example
///
/// ```
/// use evictkit::policy::arc::ArcCache;
/// use evictkit::traits::CachePolicy;
///
/// let mut cache = ArcCache::new(100);
///
/// // New entries land in T1 (seen once)
/// cache.put("page1", "content1");
/// assert_eq!(cache.t1_len(), 1);
///
/// // A re-access promotes to T2 (seen twice)
/// assert_eq!(cache.get(&"page1"), Some(&"content1"));
/// assert_eq!(cache.t2_len(), 1);
/// ```
pub struct ArcCache<K, V> {
    /// Resident index over T1 ∪ T2; ghosts are tracked by B1/B2 themselves.
    index: FxHashMap<K, (ListKind, SlotId)>,
    t1: RecencyList<Entry<K, V>>,
    t2: RecencyList<Entry<K, V>>,
    b1: GhostList<K>,
    b2: GhostList<K>,
    /// Adaptation target for |T1|, within `[0, capacity]`.
    p: usize,
    capacity: usize,
}

impl<K, V> ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an ARC cache holding at most `capacity` resident entries.
    ///
    /// `p` starts at 0 (pure frequency preference) and adapts from there.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            t1: RecencyList::with_capacity(capacity),
            t2: RecencyList::with_capacity(capacity),
            b1: GhostList::new(capacity),
            // L2 = T2 ∪ B2 may hold up to 2c keys
            b2: GhostList::new(capacity.saturating_mul(2)),
            p: 0,
            capacity,
        }
    }

    /// Returns the current adaptation target for T1.
    pub fn p_value(&self) -> usize {
        self.p
    }

    /// Returns the number of entries seen once recently.
    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    /// Returns the number of entries seen at least twice recently.
    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    /// Returns the number of ghost keys evicted from T1.
    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    /// Returns the number of ghost keys evicted from T2.
    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Returns `true` if `key` is tracked in the B1 ghost list.
    pub fn in_b1_ghost(&self, key: &K) -> bool {
        self.b1.contains(key)
    }

    /// Returns `true` if `key` is tracked in the B2 ghost list.
    pub fn in_b2_ghost(&self, key: &K) -> bool {
        self.b2.contains(key)
    }

    /// B1 said we evicted recency too aggressively: grow `p`.
    fn adapt_toward_recency(&mut self) {
        let delta = if self.b1.is_empty() {
            1
        } else {
            (self.b2.len() / self.b1.len()).max(1)
        };
        self.p = (self.p + delta).min(self.capacity);
    }

    /// B2 said frequency deserved the space: shrink `p`.
    fn adapt_toward_frequency(&mut self) {
        let delta = if self.b2.is_empty() {
            1
        } else {
            (self.b1.len() / self.b2.len()).max(1)
        };
        self.p = self.p.saturating_sub(delta);
    }

    /// The eviction primitive: demote one resident to its ghost list.
    ///
    /// Evicts T1's LRU into B1 when `|T1| > p` (or `|T1| == p` and the
    /// triggering key was a B2 ghost hit), otherwise T2's LRU into B2.
    fn replace(&mut self, in_b2: bool) {
        let t1_len = self.t1.len();
        let from_t1 = t1_len > 0 && (t1_len > self.p || (in_b2 && t1_len == self.p));

        if from_t1 {
            if let Some(entry) = self.t1.pop_back() {
                self.index.remove(&entry.key);
                self.b1.record(entry.key);
            }
        } else if let Some(entry) = self.t2.pop_back() {
            self.index.remove(&entry.key);
            self.b2.record(entry.key);
        } else if let Some(entry) = self.t1.pop_back() {
            // T2 empty; an eviction is still owed
            self.index.remove(&entry.key);
            self.b1.record(entry.key);
        }
    }

    fn resident_len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    /// Promotes a resident entry to T2's MRU position, returning the slot
    /// holding it afterwards.
    fn promote_to_t2(&mut self, kind: ListKind, id: SlotId) -> SlotId {
        match kind {
            ListKind::T1 => {
                let entry = self.t1.remove(id).expect("indexed entry not linked");
                let new_id = self.t2.push_front(entry);
                let key = self
                    .t2
                    .get(new_id)
                    .map(|entry| entry.key.clone())
                    .expect("entry just pushed");
                self.index.insert(key, (ListKind::T2, new_id));
                new_id
            }
            ListKind::T2 => {
                self.t2.move_to_front(id);
                id
            }
        }
    }

    /// Admits a brand-new entry at the MRU position of `kind`.
    fn admit(&mut self, kind: ListKind, key: K, value: V) {
        let entry = Entry {
            key: key.clone(),
            value,
        };
        let id = match kind {
            ListKind::T1 => self.t1.push_front(entry),
            ListKind::T2 => self.t2.push_front(entry),
        };
        self.index.insert(key, (kind, id));
    }

}

impl<K, V> ArcCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let t1 = self.t1.len();
        let t2 = self.t2.len();
        let b1 = self.b1.len();
        let b2 = self.b2.len();

        assert_eq!(self.index.len(), t1 + t2, "index desync with T1+T2");
        assert!(t1 + t2 <= self.capacity, "residents exceed capacity");
        assert!(t1 + b1 <= self.capacity, "|T1|+|B1| exceeds capacity");
        assert!(
            t2 + b2 <= 2 * self.capacity,
            "|T2|+|B2| exceeds twice capacity"
        );
        assert!(
            t1 + t2 + b1 + b2 <= 2 * self.capacity,
            "directory exceeds twice capacity"
        );
        assert!(self.p <= self.capacity, "p out of range");

        for (key, &(kind, id)) in &self.index {
            let entry = match kind {
                ListKind::T1 => self.t1.get(id),
                ListKind::T2 => self.t2.get(id),
            };
            let entry = entry.expect("indexed entry not linked");
            assert!(&entry.key == key, "index key mismatch");
            assert!(!self.b1.contains(key), "resident key in B1");
            assert!(!self.b2.contains(key), "resident key in B2");
        }

        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();
    }
}

impl<K, V> CachePolicy<K, V> for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.capacity == 0 {
            return None;
        }

        // Case 1: resident hit. Promote and swap the value.
        if let Some(&(kind, id)) = self.index.get(&key) {
            let id = self.promote_to_t2(kind, id);
            let entry = self.t2.get_mut(id).expect("promoted entry not linked");
            return Some(std::mem::replace(&mut entry.value, value));
        }

        // Case 2: B1 ghost hit. The recency side was right.
        if self.b1.contains(&key) {
            self.adapt_toward_recency();
            if self.resident_len() >= self.capacity {
                self.replace(false);
            }
            self.b1.remove(&key);
            self.admit(ListKind::T2, key, value);
            return None;
        }

        // Case 3: B2 ghost hit. The frequency side was right.
        if self.b2.contains(&key) {
            self.adapt_toward_frequency();
            if self.resident_len() >= self.capacity {
                self.replace(true);
            }
            self.b2.remove(&key);
            self.admit(ListKind::T2, key, value);
            return None;
        }

        // Case 4: full miss.
        let l1 = self.t1.len() + self.b1.len();
        if l1 >= self.capacity {
            if self.t1.len() < self.capacity {
                // Recycle the oldest recency ghost before evicting.
                self.b1.pop_lru();
                if self.resident_len() >= self.capacity {
                    self.replace(false);
                }
            } else {
                // B1 is empty and T1 fills the cache: drop T1's LRU outright.
                if let Some(entry) = self.t1.pop_back() {
                    self.index.remove(&entry.key);
                }
            }
        } else {
            let total = self.resident_len() + self.b1.len() + self.b2.len();
            if total >= self.capacity {
                if total >= 2 * self.capacity {
                    self.b2.pop_lru();
                }
                if self.resident_len() >= self.capacity {
                    self.replace(false);
                }
            }
        }

        self.admit(ListKind::T1, key, value);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if let Some(&(kind, id)) = self.index.get(key) {
            let id = self.promote_to_t2(kind, id);
            return self.t2.get(id).map(|entry| &entry.value);
        }

        // Ghost hits carry no value: adapt, then report the miss. The ghost
        // entry stays put so a following `put` still sees it.
        if self.b1.contains(key) {
            self.adapt_toward_recency();
        } else if self.b2.contains(key) {
            self.adapt_toward_frequency();
        }
        None
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.resident_len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.p = 0;
    }
}

impl<K, V> MutableCache<K, V> for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Removes a resident entry entirely; no ghost key survives.
    fn remove(&mut self, key: &K) -> Option<V> {
        let (kind, id) = self.index.remove(key)?;
        let entry = match kind {
            ListKind::T1 => self.t1.remove(id),
            ListKind::T2 => self.t2.remove(id),
        };
        entry.map(|entry| entry.value)
    }
}

impl<K, V> fmt::Debug for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("t1_len", &self.t1.len())
            .field("t2_len", &self.t2.len())
            .field("b1_len", &self.b1.len())
            .field("b2_len", &self.b2.len())
            .field("p", &self.p)
            .finish()
    }
}
