//! Service Layer
//!
//! Business logic behind the route handlers. Routes stay thin; the
//! retrieval service owns the cache-aside and retry policy.

mod retrieval;

pub use retrieval::RetrievalService;
