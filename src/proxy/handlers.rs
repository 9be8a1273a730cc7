//! Proxy Handlers
//!
//! The fallback handler every proxied request lands on, plus the admin
//! endpoints under `/_cache`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    response::Response,
    Json,
};
use chrono::{DateTime, Utc};
use http::header::{self, HeaderName};
use http::Method;
use tracing::{error, info, warn};

use crate::cache::{cache_key, ResponseCache, ResponseEntry};
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, StatsResponse};

use super::upstream::UpstreamClient;

/// Response header marking whether the cache answered.
const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Connection-scoped headers that must not be relayed to the client.
const HOP_BY_HOP_HEADERS: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.iter().any(|hop| hop == name)
}

// == App State ==
/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache facade consulted before any upstream fetch
    pub cache: Arc<ResponseCache>,
    /// Client for the configured origin
    pub upstream: Arc<UpstreamClient>,
    /// Server start time for health reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates the shared state from a ready cache facade and upstream client.
    pub fn new(cache: ResponseCache, upstream: UpstreamClient) -> Self {
        Self {
            cache: Arc::new(cache),
            upstream: Arc::new(upstream),
            started_at: Utc::now(),
        }
    }
}

// == Proxy Handler ==
/// Handles every request no admin route matched.
///
/// GET requests are answered from the cache when possible and written back
/// to it after a miss; other methods pass straight through untouched. The
/// `X-Cache` response header reports which path was taken. A failed cache
/// write is logged and the fresh response served anyway, so a cache fault
/// never turns a good upstream answer into a client-visible error.
pub async fn proxy_handler(State(state): State<AppState>, req: Request) -> Result<Response> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let key = cache_key(&method, &path);

    if method == Method::GET {
        if let Some(entry) = state.cache.get(&key).await {
            info!(key = %key, "cache hit");
            return build_response(&entry, "HIT");
        }
        info!(key = %key, "cache miss");
    }

    let body = to_bytes(req.into_body(), usize::MAX).await?;

    let entry = match state.upstream.fetch(method.clone(), &path, body).await {
        Ok(entry) => entry,
        Err(e) => {
            error!(key = %key, error = %e, "upstream fetch failed");
            return Err(e);
        }
    };

    if method == Method::GET {
        if let Err(e) = state.cache.set(&key, entry.clone()).await {
            // Serving the fresh response matters more than caching it
            warn!(key = %key, error = %e, "failed to cache response");
        }
    }

    build_response(&entry, "MISS")
}

/// Assembles the client response from an entry.
///
/// Hop-by-hop headers and any upstream cache marker are stripped here, at
/// serve time only; the stored entry keeps the upstream headers verbatim.
fn build_response(entry: &ResponseEntry, cache_status: &'static str) -> Result<Response> {
    let mut builder = Response::builder().status(entry.status);
    for (name, value) in entry.headers.iter() {
        if is_hop_by_hop(name) || name == &X_CACHE {
            continue;
        }
        builder = builder.header(name, value);
    }
    let response = builder
        .header(X_CACHE, cache_status)
        .body(Body::from(entry.body.clone()))?;
    Ok(response)
}

// == Admin Handlers ==
/// Handler for GET /_cache/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;
    Json(HealthResponse::healthy(uptime_secs))
}

/// Handler for GET /_cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(state.cache.backend_name(), &stats))
}

/// Handler for DELETE /_cache
///
/// Drops every cached entry from the active backend.
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.cache.clear().await?;
    info!("cache cleared");
    Ok(Json(ClearResponse::cleared()))
}
