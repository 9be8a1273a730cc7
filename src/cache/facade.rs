//! Cache Facade Module
//!
//! The single interface the proxy handler talks to, independent of which
//! backend is active.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::cache::{CacheStats, DiskStore, ResponseEntry, TtlStore};
use crate::error::Result;

// == Backend ==
/// The storage engine behind the facade.
#[derive(Debug)]
enum Backend {
    /// In-memory TTL store, shared with the background sweeper
    Memory(Arc<TtlStore<ResponseEntry>>),
    /// Disk-persistent store
    Disk(DiskStore),
}

// == Response Cache ==
/// Uniform get/set/clear surface over either backend.
///
/// Hit and miss counters live here so both backends are accounted the same
/// way. Swapping backends changes persistence and expiry behavior only,
/// never the caller-visible API.
#[derive(Debug)]
pub struct ResponseCache {
    backend: Backend,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    // == Constructors ==
    /// Creates a facade over the in-memory TTL store.
    ///
    /// The store arrives shared so the caller can hand the same instance to
    /// the background sweeper.
    pub fn memory(store: Arc<TtlStore<ResponseEntry>>) -> Self {
        Self {
            backend: Backend::Memory(store),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a facade over the disk store.
    pub fn disk(store: DiskStore) -> Self {
        Self {
            backend: Backend::Disk(store),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    // == Get ==
    /// Looks up the entry for `key`, counting the outcome.
    ///
    /// Absent, expired and unreadable entries all surface as `None`; backend
    /// read failures never escape as errors.
    pub async fn get(&self, key: &str) -> Option<ResponseEntry> {
        let entry = match &self.backend {
            Backend::Memory(store) => store.get(key).await,
            Backend::Disk(store) => store.get(key).await,
        };
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    // == Set ==
    /// Stores `entry` under `key`, replacing any previous entry whole.
    pub async fn set(&self, key: &str, entry: ResponseEntry) -> Result<()> {
        match &self.backend {
            Backend::Memory(store) => {
                store.put(key, entry).await;
                Ok(())
            }
            Backend::Disk(store) => store.set(key, &entry).await,
        }
    }

    // == Clear ==
    /// Drops every cached entry.
    pub async fn clear(&self) -> Result<()> {
        match &self.backend {
            Backend::Memory(store) => {
                store.clear().await;
                Ok(())
            }
            Backend::Disk(store) => store.clear().await,
        }
    }

    // == Stats ==
    /// Snapshot of the hit/miss counters plus, for the memory backend, the
    /// current entry count.
    pub async fn stats(&self) -> CacheStats {
        let entries = match &self.backend {
            Backend::Memory(store) => Some(store.len().await),
            Backend::Disk(_) => None,
        };
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Name of the active backend for logs and the stats surface.
    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Memory(_) => "memory",
            Backend::Disk(_) => "disk",
        }
    }
}
