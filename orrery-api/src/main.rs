//! ORRERY API Server Entry Point
//!
//! Bootstraps configuration from the environment, wires the upstream
//! client and cache into the retrieval service, and starts the Axum HTTP
//! server.

use std::sync::Arc;

use axum::Router;
use orrery_api::{create_api_router, ApiError, ApiResult, AppConfig, AppState, RetrievalService};
use orrery_cache::InMemoryCache;
use orrery_core::Planet;
use orrery_upstream::SwapiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing();

    let config = AppConfig::from_env().map_err(ApiError::from)?;

    let source = Arc::new(SwapiClient::new(&config.upstream_base_url));
    let cache: Arc<InMemoryCache<Planet>> = Arc::new(InMemoryCache::new());
    let retrieval = Arc::new(RetrievalService::new(
        source,
        cache,
        config.retrieval.clone(),
    ));
    let state = Arc::new(AppState::new(retrieval));

    let app: Router = create_api_router(state);

    let addr = config.bind_addr().map_err(ApiError::from)?;
    tracing::info!(%addr, upstream = %config.upstream_base_url, "Starting ORRERY API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("orrery_api=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
