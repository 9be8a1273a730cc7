//! Cache Module
//!
//! The cache engine: the entry model, the generic TTL store with its sweep
//! protocol, the disk-persistent backend and the facade the proxy handler
//! consults.

mod disk;
mod entry;
mod facade;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use disk::DiskStore;
pub use entry::{cache_key, ResponseEntry};
pub use facade::ResponseCache;
pub use stats::CacheStats;
pub use store::TtlStore;
