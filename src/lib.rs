//! Caching Proxy - A caching reverse proxy server
//!
//! Forwards requests to a configured origin and serves repeated GETs from
//! a TTL-bound cache, backed by memory or disk.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod tasks;

pub use config::Config;
pub use proxy::AppState;
pub use tasks::spawn_sweeper;
