//! Deterministic key-to-shard routing.
//!
//! A sharded cache owns one selector and asks it which shard a key lands in;
//! the mapping is a seeded hash reduced modulo the shard count, so the same
//! `(key, seed, shards)` tuple always yields the same shard. The selector
//! itself holds no lock and no mutable state.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maps any `Hash`able key to a shard index in `[0, shards)`.
///
/// # Example
///
/// ```
/// use evictkit::ds::ShardSelector;
///
/// let selector = ShardSelector::new(4, 0);
/// let shard = selector.shard_for_key(&"user:123");
/// assert!(shard < 4);
///
/// // Same key always maps to the same shard
/// assert_eq!(selector.shard_for_key(&"user:123"), shard);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards with the given `seed`.
    ///
    /// The shard count is clamped to at least 1.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash>(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector with seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_selector_is_deterministic() {
        let selector = ShardSelector::new(8, 123);

        let a = selector.shard_for_key(&"key");
        let b = selector.shard_for_key(&"key");
        assert_eq!(a, b);
        assert!(a < selector.shard_count());
    }

    #[test]
    fn shard_selector_zero_shards_clamped_to_one() {
        let selector = ShardSelector::new(0, 0);
        assert_eq!(selector.shard_count(), 1);
        assert_eq!(selector.shard_for_key(&42u64), 0);
    }
}
