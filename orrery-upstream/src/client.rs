//! HTTP client for the SWAPI-style upstream provider.

use async_trait::async_trait;
use orrery_core::{OrreryResult, Planet};
use reqwest::Client;

use crate::{bad_status, invalid_body, transport_failed, PlanetSource};

/// Upstream planet client.
///
/// Issues exactly one GET per fetch against
/// `<base-url>/planets/<id>`. Retry is the caller's responsibility.
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    /// Create a new client against the given base URL.
    ///
    /// A trailing slash on the base URL is normalized away so the resource
    /// path joins cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The resource URL for a planet id.
    fn planet_url(&self, id: u32) -> String {
        format!("{}/planets/{}", self.base_url, id)
    }
}

#[async_trait]
impl PlanetSource for SwapiClient {
    async fn fetch_planet(&self, id: u32) -> OrreryResult<Planet> {
        let url = self.planet_url(id);
        tracing::debug!(planet_id = id, %url, "fetching planet from upstream");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_failed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(bad_status(status.as_u16(), error_text));
        }

        response
            .json::<Planet>()
            .await
            .map_err(|e| invalid_body(format!("Failed to parse response: {}", e)))
    }
}

impl std::fmt::Debug for SwapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
