//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the caching proxy.
///
/// A key that is absent or expired is not an error; lookups report that as
/// `None` and the variants here cover genuine failures only.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem failure in the disk backend
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Cache key unusable as a directory name
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Upstream request could not be completed
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Client request body could not be read
    #[error("Failed to read request body: {0}")]
    BodyRead(#[from] axum::Error),

    /// Response assembly from a cached or fetched entry failed
    #[error("Failed to build response: {0}")]
    Response(#[from] http::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CacheError::BodyRead(_) => StatusCode::BAD_REQUEST,
            CacheError::Io(_) | CacheError::InvalidKey(_) | CacheError::Response(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, CacheError>;
