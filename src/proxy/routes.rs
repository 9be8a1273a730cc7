//! Route Configuration
//!
//! Wires the admin endpoints and the catch-all proxy fallback into an
//! axum router with CORS and request tracing.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};

/// Creates the application router.
///
/// # Endpoints
///
/// - `GET /_cache/health` - Health check with uptime
/// - `GET /_cache/stats` - Hit/miss counters for the active backend
/// - `DELETE /_cache` - Drop every cached entry
/// - anything else - Proxied to the origin through the cache
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/_cache/health", get(handlers::health_handler))
        .route("/_cache/stats", get(handlers::stats_handler))
        .route("/_cache", delete(handlers::clear_handler))
        .fallback(handlers::proxy_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
