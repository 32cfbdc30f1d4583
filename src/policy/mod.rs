//! Eviction policy implementations.
//!
//! Each core is single-threaded and O(1) per operation; the sharded
//! compositions in [`sharded`] layer per-shard locking on top.

pub mod arc;
pub mod lfu;
pub mod lru;
pub mod lru_k;
pub mod sharded;

pub use arc::ArcCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use lru_k::LruKCache;
pub use sharded::{ShardedArcCache, ShardedCache, ShardedLfuCache, ShardedLruCache};
