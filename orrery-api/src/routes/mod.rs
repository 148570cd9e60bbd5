//! API route modules and router assembly.

pub mod health;
pub mod planets;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full API router.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/planets", planets::create_router(state))
        .nest("/health", health::create_router())
        .layer(TraceLayer::new_for_http())
}
