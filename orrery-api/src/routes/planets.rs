//! Planet Endpoints
//!
//! The single inbound operation: GET /planets/random. No request body, no
//! parameters; responds with the planet as JSON or a gateway-timeout-class
//! error envelope when retrieval exhausts its retries.

use axum::{extract::State, routing::get, Json, Router};
use orrery_core::Planet;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /planets/random - A randomly selected planet
pub async fn random_planet(State(state): State<Arc<AppState>>) -> ApiResult<Json<Planet>> {
    let planet = state.retrieval.random_planet().await?;
    Ok(Json(planet))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the planets router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/random", get(random_planet))
        .with_state(state)
}
