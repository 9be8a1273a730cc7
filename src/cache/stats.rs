//! Cache Statistics Module
//!
//! Point-in-time snapshot of the facade's hit/miss accounting.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache effectiveness counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that fell through to the upstream
    pub misses: u64,
    /// Entry count, when the backend can report one cheaply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
