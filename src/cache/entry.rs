//! Cache Entry Module
//!
//! Defines the response value stored per cache key and the key derivation.

use http::{HeaderMap, Method, StatusCode};

// == Response Entry ==
/// A complete upstream response held by the cache.
///
/// Status, headers and body are captured verbatim at fetch time. An entry is
/// immutable once stored; a later `set` for the same key replaces it whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    /// Upstream status code
    pub status: StatusCode,
    /// Upstream response headers, value order per name preserved
    pub headers: HeaderMap,
    /// Raw response body bytes
    pub body: Vec<u8>,
}

impl ResponseEntry {
    /// Creates a new entry from the parts of an upstream response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

// == Key Derivation ==
/// Derives the cache key for a request as `"<METHOD>-<PATH>"`.
///
/// Keys are stable and unique per (method, path) pair. The query string is
/// deliberately not part of the key, so requests differing only by query
/// share one entry.
pub fn cache_key(method: &Method, path: &str) -> String {
    format!("{}-{}", method, path)
}
