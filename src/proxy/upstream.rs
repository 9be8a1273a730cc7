//! Upstream Client Module
//!
//! Forwards requests the cache cannot answer to the configured origin and
//! buffers the response into a cacheable entry.

use bytes::Bytes;
use http::Method;
use tracing::debug;

use crate::cache::ResponseEntry;
use crate::error::Result;

// == Upstream Client ==
/// HTTP client bound to a single origin.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    origin: String,
}

impl UpstreamClient {
    /// Creates a client forwarding to `origin` (scheme plus authority; a
    /// trailing slash is tolerated).
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            client: reqwest::Client::new(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    // == Fetch ==
    /// Forwards `method` on `path` with `body` to the origin and buffers the
    /// complete response.
    ///
    /// The target URL is the origin joined with the request path; the
    /// client's query string and request headers are not forwarded. Any
    /// transport failure surfaces as an upstream error; an error status from
    /// the origin is a valid response, not an error.
    pub async fn fetch(&self, method: Method, path: &str, body: Bytes) -> Result<ResponseEntry> {
        let url = format!("{}{}", self.origin, path);
        debug!(method = %method, url = %url, "forwarding request upstream");

        let response = self.client.request(method, &url).body(body).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(ResponseEntry::new(status, headers, body))
    }
}
