pub use crate::builder::{Cache, CacheBuilder, EvictionPolicy};
pub use crate::error::ConfigError;
pub use crate::policy::{
    ArcCache, LfuCache, LruCache, LruKCache, ShardedArcCache, ShardedLfuCache, ShardedLruCache,
};
pub use crate::traits::{CachePolicy, MutableCache};
