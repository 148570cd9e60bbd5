//! In-memory TTL cache backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orrery_core::OrreryResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::traits::{CacheStats, CacheStore};

/// A stored value with its insertion time and time-to-live.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    cached_at: DateTime<Utc>,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// An entry is fresh while its staleness is strictly below its TTL.
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let staleness = if now > self.cached_at {
            (now - self.cached_at).to_std().unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        };
        staleness < self.ttl
    }
}

/// In-memory cache with per-entry TTL.
///
/// Holds any number of independent keys; the only eviction is TTL expiry.
/// Thread-safe via an async RwLock; hit/miss counters are observability
/// only and never influence the result of a read.
pub struct InMemoryCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> InMemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Remove the entry for `key`, if any.
    pub async fn remove(&self, key: &str) -> Option<T> {
        self.entries.write().await.remove(key).map(|e| e.value)
    }

    /// Drop all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of entries currently held, expired entries included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of hit/miss counters and entry count.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.len().await as u64,
        }
    }
}

impl<T> Default for InMemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> CacheStore<T> for InMemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> OrreryResult<Option<T>> {
        let entries = self.entries.read().await;
        let hit = entries
            .get(key)
            .filter(|entry| entry.is_fresh(Utc::now()))
            .map(|entry| entry.value.clone());

        match hit {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(value))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: T, ttl: Duration) -> OrreryResult<()> {
        let entry = CacheEntry {
            value,
            cached_at: Utc::now(),
            ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }
}

impl<T> std::fmt::Debug for InMemoryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
