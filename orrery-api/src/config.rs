//! Service Configuration
//!
//! Configuration is loaded once from environment variables at startup with
//! sensible defaults; the upstream base URL is the only required value and
//! is never re-read per request.

use orrery_core::{ConfigError, OrreryResult};
use std::net::SocketAddr;
use std::time::Duration;

// ============================================================================
// RETRIEVAL CONFIGURATION
// ============================================================================

/// Knobs for the fetch-with-retry-then-cache orchestration.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Size of the provider's id space; random ids are drawn from
    /// [1, total_planets]. A fixed constant, not discovered from the
    /// provider.
    pub total_planets: u32,

    /// Retries allowed after the first attempt; at most
    /// `max_retries + 1` upstream calls are made per retrieval.
    pub max_retries: u32,

    /// Fixed wait between consecutive attempts.
    pub retry_delay: Duration,

    /// TTL for the cached record. Deliberately short: this is a
    /// lightweight cache-aside, not a durable cache.
    pub cache_ttl: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            total_planets: 60,
            max_retries: 5,
            retry_delay: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(3),
        }
    }
}

// ============================================================================
// APPLICATION CONFIGURATION
// ============================================================================

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream planet provider.
    pub upstream_base_url: String,

    /// Host to bind the HTTP listener to.
    pub bind_host: String,

    /// Port to bind the HTTP listener to.
    pub port: u16,

    /// Retrieval orchestration knobs.
    pub retrieval: RetrievalConfig,
}

impl AppConfig {
    /// Create AppConfig from environment variables.
    ///
    /// Environment variables:
    /// - `ORRERY_UPSTREAM_URL`: Upstream base URL (required)
    /// - `ORRERY_TOTAL_PLANETS`: Provider id space size (default: 60)
    /// - `ORRERY_MAX_RETRIES`: Retries after the first attempt (default: 5)
    /// - `ORRERY_RETRY_DELAY_MS`: Wait between attempts in ms (default: 1000)
    /// - `ORRERY_CACHE_TTL_SECS`: Cached record TTL in seconds (default: 3)
    /// - `ORRERY_BIND`: Bind host (default: "0.0.0.0")
    /// - `PORT` / `ORRERY_PORT`: Bind port (default: 3000)
    pub fn from_env() -> OrreryResult<Self> {
        let upstream_base_url = std::env::var("ORRERY_UPSTREAM_URL").map_err(|_| {
            ConfigError::MissingRequired {
                field: "ORRERY_UPSTREAM_URL".to_string(),
            }
        })?;

        let total_planets = std::env::var("ORRERY_TOTAL_PLANETS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        let max_retries = std::env::var("ORRERY_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let retry_delay_ms = std::env::var("ORRERY_RETRY_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        let cache_ttl_secs = std::env::var("ORRERY_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);

        let bind_host = std::env::var("ORRERY_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("ORRERY_PORT").ok())
            .unwrap_or_else(|| "3000".to_string());
        let port = port_str
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port_str,
                reason: "must be a valid port number".to_string(),
            })?;

        Ok(Self {
            upstream_base_url,
            bind_host,
            port,
            retrieval: RetrievalConfig {
                total_planets,
                max_retries,
                retry_delay: Duration::from_millis(retry_delay_ms),
                cache_ttl: Duration::from_secs(cache_ttl_secs),
            },
        })
    }

    /// The socket address to bind the listener to.
    pub fn bind_addr(&self) -> OrreryResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| {
                ConfigError::InvalidValue {
                    field: "ORRERY_BIND".to_string(),
                    value: addr,
                    reason: e.to_string(),
                }
                .into()
            })
    }
}
