//! Proxy Module
//!
//! HTTP layer of the caching proxy. Admin routes live under `/_cache`;
//! every other request falls through to the origin via the cache.

pub mod handlers;
pub mod routes;
pub mod upstream;

pub use handlers::AppState;
pub use routes::create_router;
pub use upstream::UpstreamClient;
