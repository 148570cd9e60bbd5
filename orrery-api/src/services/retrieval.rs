//! Random planet retrieval: cache-aside lookup with bounded upstream retry.
//!
//! The policy, in order: consult the cache under a single fixed key; on a
//! hit return immediately with no side effects. On a miss, draw one random
//! id and fetch it from the upstream with up to `max_retries` retries after
//! the first attempt, sleeping a fixed delay between attempts. The id is
//! not re-randomized between attempts. The first success is written back to
//! the cache with a short TTL. Per-attempt failures are logged and absorbed;
//! only terminal exhaustion escapes, as a timeout-class error.

use orrery_cache::CacheStore;
use orrery_core::{OrreryResult, Planet, RetrievalError};
use orrery_upstream::PlanetSource;
use rand::Rng;
use std::sync::Arc;

use crate::config::RetrievalConfig;

/// The cache holds at most one planet at a time, whichever id it came from.
const PLANET_CACHE_KEY: &str = "planet";

/// Orchestrates cache lookup, upstream fetch, retry, and cache population.
///
/// Collaborators are injected at construction; the service holds no global
/// state beyond them.
pub struct RetrievalService {
    source: Arc<dyn PlanetSource>,
    cache: Arc<dyn CacheStore<Planet>>,
    config: RetrievalConfig,
}

impl RetrievalService {
    /// Create a new retrieval service.
    pub fn new(
        source: Arc<dyn PlanetSource>,
        cache: Arc<dyn CacheStore<Planet>>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    /// Return a randomly-selected planet, from cache when possible.
    ///
    /// A cache hit short-circuits the entire retry/random-id machinery;
    /// cached state is never re-validated against the upstream. Cache
    /// store failures are fatal to the call and propagate directly.
    pub async fn random_planet(&self) -> OrreryResult<Planet> {
        if let Some(planet) = self.cache.get(PLANET_CACHE_KEY).await? {
            tracing::debug!(planet = %planet.name, "planet served from cache");
            return Ok(planet);
        }

        let id = random_planet_id(self.config.total_planets);
        tracing::debug!(planet_id = id, "cache miss, fetching planet from upstream");
        let planet = self.fetch_with_retry(id).await?;

        self.cache
            .set(PLANET_CACHE_KEY, planet.clone(), self.config.cache_ttl)
            .await?;
        Ok(planet)
    }

    /// Fetch one id with bounded retry and a fixed inter-attempt delay.
    ///
    /// At most `max_retries + 1` upstream calls are made; the
    /// `(max_retries + 1)`-th failure raises the timeout error.
    async fn fetch_with_retry(&self, id: u32) -> OrreryResult<Planet> {
        let mut failed_attempts = 0u32;

        loop {
            match self.source.fetch_planet(id).await {
                Ok(planet) => {
                    tracing::debug!(
                        planet_id = id,
                        planet = %planet.name,
                        "planet fetched from upstream"
                    );
                    return Ok(planet);
                }
                Err(err) => {
                    failed_attempts += 1;
                    if failed_attempts > self.config.max_retries {
                        tracing::error!(
                            planet_id = id,
                            attempts = failed_attempts,
                            "upstream fetch abandoned after exhausting retries"
                        );
                        return Err(RetrievalError::Timeout {
                            attempts: failed_attempts,
                        }
                        .into());
                    }

                    tracing::warn!(
                        planet_id = id,
                        attempt = failed_attempts,
                        error = %err,
                        "upstream fetch failed, retrying"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }
    }
}

impl std::fmt::Debug for RetrievalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalService")
            .field("config", &self.config)
            .finish()
    }
}

/// Draw a uniform random id in [1, total_planets].
fn random_planet_id(total_planets: u32) -> u32 {
    rand::rng().random_range(1..=total_planets)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_cache::InMemoryCache;
    use orrery_core::OrreryError;
    use orrery_upstream::MockPlanetSource;
    use std::time::Duration;

    fn fast_config() -> RetrievalConfig {
        RetrievalConfig {
            total_planets: 60,
            max_retries: 5,
            retry_delay: Duration::from_millis(1),
            cache_ttl: Duration::from_secs(60),
        }
    }

    fn service_with(
        source: Arc<MockPlanetSource>,
        config: RetrievalConfig,
    ) -> (RetrievalService, Arc<InMemoryCache<Planet>>) {
        let cache = Arc::new(InMemoryCache::new());
        let service = RetrievalService::new(source, cache.clone(), config);
        (service, cache)
    }

    #[tokio::test]
    async fn test_miss_fetches_once_and_populates_cache() {
        let source = Arc::new(MockPlanetSource::succeeding());
        let (service, cache) = service_with(source.clone(), fast_config());

        let planet = service.random_planet().await.unwrap();

        assert_eq!(planet, source.planet());
        assert_eq!(source.call_count(), 1);
        assert_eq!(
            cache.get(PLANET_CACHE_KEY).await.unwrap(),
            Some(source.planet())
        );
    }

    #[tokio::test]
    async fn test_cache_hit_makes_zero_upstream_calls() {
        let source = Arc::new(MockPlanetSource::succeeding());
        let (service, cache) = service_with(source.clone(), fast_config());

        let mut cached = MockPlanetSource::sample_planet();
        cached.name = "Cached Bespin".to_string();
        cache
            .set(PLANET_CACHE_KEY, cached.clone(), Duration::from_secs(60))
            .await
            .unwrap();

        let planet = service.random_planet().await.unwrap();

        assert_eq!(planet, cached);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_is_served_from_cache() {
        let source = Arc::new(MockPlanetSource::succeeding());
        let (service, _cache) = service_with(source.clone(), fast_config());

        service.random_planet().await.unwrap();
        service.random_planet().await.unwrap();

        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_entry_triggers_refetch() {
        let source = Arc::new(MockPlanetSource::succeeding());
        let config = RetrievalConfig {
            cache_ttl: Duration::from_millis(20),
            ..fast_config()
        };
        let (service, _cache) = service_with(source.clone(), config);

        service.random_planet().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        service.random_planet().await.unwrap();

        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_makes_exactly_max_retries_plus_one_calls() {
        let source = Arc::new(MockPlanetSource::always_failing());
        let (service, cache) = service_with(source.clone(), fast_config());

        let err = service.random_planet().await.unwrap_err();

        // R=5 retries after the first attempt: six calls in total.
        assert_eq!(source.call_count(), 6);
        assert_eq!(
            err,
            OrreryError::Retrieval(RetrievalError::Timeout { attempts: 6 })
        );
        assert_eq!(cache.get(PLANET_CACHE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transient_failures_recover_with_k_plus_one_calls() {
        for failures in [1u32, 3, 5] {
            let source = Arc::new(MockPlanetSource::failing_first(failures));
            let (service, _cache) = service_with(source.clone(), fast_config());

            let planet = service.random_planet().await.unwrap();

            assert_eq!(planet, source.planet());
            assert_eq!(source.call_count(), failures as usize + 1);
        }
    }

    #[tokio::test]
    async fn test_same_id_is_reused_across_retry_attempts() {
        let source = Arc::new(MockPlanetSource::failing_first(3));
        let (service, _cache) = service_with(source.clone(), fast_config());

        service.random_planet().await.unwrap();

        let ids = source.requested_ids();
        assert_eq!(ids.len(), 4);
        assert!(ids.iter().all(|id| *id == ids[0]));
    }

    #[tokio::test]
    async fn test_retry_waits_between_attempts() {
        let source = Arc::new(MockPlanetSource::failing_first(2));
        let config = RetrievalConfig {
            retry_delay: Duration::from_millis(25),
            ..fast_config()
        };
        let (service, _cache) = service_with(source.clone(), config);

        let start = std::time::Instant::now();
        service.random_planet().await.unwrap();

        // Two failed attempts mean two sleeps before the third succeeds.
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_success_after_failures_populates_cache() {
        let source = Arc::new(MockPlanetSource::failing_first(2));
        let (service, cache) = service_with(source.clone(), fast_config());

        service.random_planet().await.unwrap();

        assert_eq!(
            cache.get(PLANET_CACHE_KEY).await.unwrap(),
            Some(source.planet())
        );
    }

    #[test]
    fn test_random_planet_id_stays_in_range() {
        for _ in 0..1000 {
            let id = random_planet_id(60);
            assert!((1..=60).contains(&id));
        }
    }
}
