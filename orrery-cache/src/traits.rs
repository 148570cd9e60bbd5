//! Cache store trait and usage statistics.

use async_trait::async_trait;
use orrery_core::OrreryResult;
use std::time::Duration;

/// Keyed cache with per-entry time-to-live.
///
/// Implementations must be thread-safe and support concurrent access. A set
/// racing a get for the same key may deliver either the old or the new value
/// to the concurrent reader; no stronger consistency is promised.
#[async_trait]
pub trait CacheStore<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Get a value from the cache.
    ///
    /// Returns `None` when no entry exists for the key or when its TTL has
    /// elapsed since insertion.
    async fn get(&self, key: &str) -> OrreryResult<Option<T>>;

    /// Store a value under `key`, overwriting any prior entry.
    ///
    /// The entry expires once `ttl` has elapsed from the moment of insertion.
    async fn set(&self, key: &str, value: T, ttl: Duration) -> OrreryResult<()>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (absent or expired).
    pub misses: u64,
    /// Number of entries currently held, expired entries included.
    pub entry_count: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
