//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. an LRU-k promotion threshold of zero, a shard count of zero).
//! - [`InvariantError`]: Returned when internal data-structure invariants
//!   are violated (debug-only validators).
//!
//! Runtime operations never fail: `get` reports a miss as `None` and `put`
//! resolves capacity pressure by evicting, not by erroring.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru_k::LruKCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LruKCache<u64, String>, ConfigError> =
//!     LruKCache::try_with_k(100, 200, 2);
//! assert!(cache.is_ok());
//!
//! // Invalid k is caught without panicking
//! let bad = LruKCache::<u64, String>::try_with_k(100, 200, 0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruKCache::try_with_k`](crate::policy::lru_k::LruKCache::try_with_k)
/// and the sharded `try_with_shards` constructors. Carries a human-readable
/// description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use evictkit::policy::sharded::ShardedLruCache;
///
/// let err = ShardedLruCache::<u64, u64>::try_with_shards(100, 0).unwrap_err();
/// assert!(err.to_string().contains("shard"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Index/list desync is a programming bug, not a recoverable condition;
/// the debug validators panic with a description rather than propagating.
/// This type exists for the few places that want to report the violation
/// instead of aborting (e.g. test harnesses collecting failures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
