//! ORRERY API - REST Layer and Retrieval Orchestration
//!
//! This crate exposes the planet service over HTTP (Axum) and owns the
//! retrieval orchestration: cache-aside lookup, bounded upstream retry,
//! and cache population. The upstream client and cache store are injected
//! as trait objects at construction.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::{AppConfig, RetrievalConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use services::RetrievalService;
pub use state::AppState;
