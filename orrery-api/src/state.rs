//! Shared application state for Axum routers.

use std::sync::Arc;

use crate::services::RetrievalService;

/// Application-wide state shared across all routes.
pub struct AppState {
    /// Retrieval orchestration service (cache-aside + bounded retry).
    pub retrieval: Arc<RetrievalService>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(retrieval: Arc<RetrievalService>) -> Self {
        Self {
            retrieval,
            start_time: std::time::Instant::now(),
        }
    }
}
