//! ORRERY Upstream - Planet Provider Abstraction
//!
//! Provider-agnostic trait for fetching planet records by numeric id,
//! the reqwest-backed client the service runs with, and a scriptable mock
//! source for exercising the retrieval layer in tests.
//!
//! A provider performs exactly one fetch per invocation; retry policy lives
//! with the caller, never here.

use async_trait::async_trait;
use orrery_core::{OrreryError, OrreryResult, Planet, UpstreamError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

mod client;

pub use client::SwapiClient;

// ============================================================================
// PLANET SOURCE TRAIT
// ============================================================================

/// Trait for upstream planet providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// struct StaticSource { planet: Planet }
///
/// #[async_trait]
/// impl PlanetSource for StaticSource {
///     async fn fetch_planet(&self, _id: u32) -> OrreryResult<Planet> {
///         Ok(self.planet.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait PlanetSource: Send + Sync {
    /// Fetch the planet with the given id from the provider.
    ///
    /// `id` must lie within the provider's known valid range; the caller is
    /// responsible for picking a valid id. Exactly one upstream request is
    /// issued per invocation.
    ///
    /// # Returns
    /// * `Ok(Planet)` - The fetched record
    /// * `Err(OrreryError::Upstream)` - On transport, HTTP, or body failure
    async fn fetch_planet(&self, id: u32) -> OrreryResult<Planet>;
}

// ============================================================================
// ERROR CONSTRUCTOR HELPERS
// ============================================================================

/// Build a transport-level upstream error.
pub fn transport_failed(message: impl Into<String>) -> OrreryError {
    OrreryError::Upstream(UpstreamError::Transport {
        message: message.into(),
    })
}

/// Build a non-2xx status upstream error.
pub fn bad_status(status: u16, message: impl Into<String>) -> OrreryError {
    OrreryError::Upstream(UpstreamError::BadStatus {
        status,
        message: message.into(),
    })
}

/// Build a malformed-body upstream error.
pub fn invalid_body(reason: impl Into<String>) -> OrreryError {
    OrreryError::Upstream(UpstreamError::InvalidBody {
        reason: reason.into(),
    })
}

// ============================================================================
// MOCK SOURCE FOR TESTING
// ============================================================================

/// Mock planet source for testing.
///
/// Fails a scripted number of times before succeeding, and records every
/// requested id so tests can assert call counts and id reuse.
pub struct MockPlanetSource {
    planet: Planet,
    failures_remaining: AtomicU32,
    requested: Mutex<Vec<u32>>,
}

impl MockPlanetSource {
    /// A source that succeeds on every call.
    pub fn succeeding() -> Self {
        Self::failing_first(0)
    }

    /// A source that fails the first `failures` calls, then succeeds.
    pub fn failing_first(failures: u32) -> Self {
        Self {
            planet: Self::sample_planet(),
            failures_remaining: AtomicU32::new(failures),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// A source that fails every call.
    pub fn always_failing() -> Self {
        Self::failing_first(u32::MAX)
    }

    /// Replace the record served on success.
    pub fn with_planet(mut self, planet: Planet) -> Self {
        self.planet = planet;
        self
    }

    /// The record this source serves on success.
    pub fn planet(&self) -> Planet {
        self.planet.clone()
    }

    /// Total number of fetches seen so far.
    pub fn call_count(&self) -> usize {
        self.requested_ids().len()
    }

    /// Every id requested, in call order.
    pub fn requested_ids(&self) -> Vec<u32> {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// A fixed, fully-populated planet record usable as a test fixture.
    pub fn sample_planet() -> Planet {
        Planet {
            name: "Tatooine".to_string(),
            rotation_period: "23".to_string(),
            orbital_period: "304".to_string(),
            diameter: "10465".to_string(),
            climate: "arid".to_string(),
            gravity: "1 standard".to_string(),
            terrain: "desert".to_string(),
            surface_water: "1".to_string(),
            population: "200000".to_string(),
            residents: vec!["https://example.test/people/1/".to_string()],
            films: vec!["https://example.test/films/1/".to_string()],
            created: "2014-12-09T13:50:49.641000Z".to_string(),
            edited: "2014-12-20T20:58:18.411000Z".to_string(),
            url: "https://example.test/planets/1/".to_string(),
        }
    }
}

#[async_trait]
impl PlanetSource for MockPlanetSource {
    async fn fetch_planet(&self, id: u32) -> OrreryResult<Planet> {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(id);

        let failed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if failed {
            Err(bad_status(500, "mock upstream failure"))
        } else {
            Ok(self.planet.clone())
        }
    }
}

impl std::fmt::Debug for MockPlanetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPlanetSource")
            .field(
                "failures_remaining",
                &self.failures_remaining.load(Ordering::SeqCst),
            )
            .field("call_count", &self.call_count())
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_succeeding_source_returns_planet() {
        let source = MockPlanetSource::succeeding();
        let planet = source.fetch_planet(7).await.unwrap();
        assert_eq!(planet, source.planet());
        assert_eq!(source.requested_ids(), vec![7]);
    }

    #[tokio::test]
    async fn test_failing_source_reports_upstream_error() {
        let source = MockPlanetSource::always_failing();
        let err = source.fetch_planet(3).await.unwrap_err();
        assert!(matches!(
            err,
            OrreryError::Upstream(UpstreamError::BadStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_failing_first_recovers_after_scripted_failures() {
        let source = MockPlanetSource::failing_first(2);
        assert!(source.fetch_planet(1).await.is_err());
        assert!(source.fetch_planet(1).await.is_err());
        assert!(source.fetch_planet(1).await.is_ok());
        assert_eq!(source.call_count(), 3);
    }

    #[test]
    fn test_error_helpers_wrap_upstream_variants() {
        assert!(matches!(
            transport_failed("boom"),
            OrreryError::Upstream(UpstreamError::Transport { .. })
        ));
        assert!(matches!(
            bad_status(502, "bad gateway"),
            OrreryError::Upstream(UpstreamError::BadStatus { status: 502, .. })
        ));
        assert!(matches!(
            invalid_body("truncated"),
            OrreryError::Upstream(UpstreamError::InvalidBody { .. })
        ));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// A source scripted to fail `k` times fails exactly `k` times and
        /// succeeds from call `k + 1` onwards.
        #[test]
        fn prop_failing_first_fails_exactly_k_times(k in 0u32..8) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let source = MockPlanetSource::failing_first(k);
                for _ in 0..k {
                    prop_assert!(source.fetch_planet(1).await.is_err());
                }
                prop_assert!(source.fetch_planet(1).await.is_ok());
                prop_assert!(source.fetch_planet(1).await.is_ok());
                Ok(())
            })?;
        }
    }
}
