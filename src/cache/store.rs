//! TTL Store Module
//!
//! Generic time-limited key/value store with lazy expiry and an explicit
//! sweep operation for the background cleanup task.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

// == TTL Record ==
/// A stored value with its absolute expiry time.
#[derive(Debug, Clone)]
pub struct TtlRecord<V> {
    /// The stored value
    value: V,
    /// Absolute expiry, fixed at insertion
    expires_at: Instant,
}

impl<V> TtlRecord<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Checks if the record has expired.
    ///
    /// Boundary condition: a record is dead once the current time is greater
    /// than or equal to its expiry, whether or not it has been physically
    /// purged yet.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == TTL Store ==
/// Generic, concurrency-safe mapping from string keys to expiring values.
///
/// Every insertion gets `expires_at = now + ttl` from the store-wide TTL.
/// Expiry is enforced at read time (lazy expiry) independently of the
/// periodic sweep, so an expired record is never returned even before the
/// sweep has removed it. All operations take the store's single lock and are
/// safe to call concurrently from many tasks.
#[derive(Debug)]
pub struct TtlStore<V> {
    /// Keyed records behind the store's lock
    records: RwLock<HashMap<String, TtlRecord<V>>>,
    /// TTL applied to every insertion
    ttl: Duration,
}

impl<V: Clone> TtlStore<V> {
    // == Constructor ==
    /// Creates an empty store whose insertions expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    // == Put ==
    /// Inserts or replaces the record for `key` with a fresh expiry.
    ///
    /// Always succeeds; the store has no capacity bound.
    pub async fn put(&self, key: impl Into<String>, value: V) {
        let mut records = self.records.write().await;
        records.insert(key.into(), TtlRecord::new(value, self.ttl));
    }

    // == Get ==
    /// Returns the live value for `key`, or `None` if absent or expired.
    ///
    /// An expired record found here is removed on the spot rather than left
    /// for the next sweep.
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let records = self.records.read().await;
            match records.get(key) {
                Some(record) if !record.is_expired() => return Some(record.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: re-check under the write lock so a racing put that just
        // replaced the record is not thrown away.
        let mut records = self.records.write().await;
        if records.get(key).is_some_and(|record| record.is_expired()) {
            records.remove(key);
        }
        None
    }

    // == Clear ==
    /// Removes all records.
    pub async fn clear(&self) {
        let mut records = self.records.write().await;
        records.clear();
    }

    // == Sweep ==
    /// Removes every expired record and returns how many were dropped.
    ///
    /// Holds the write lock for a single retain pass over the map.
    pub async fn sweep(&self) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        before - records.len()
    }

    // == Length ==
    /// Current number of physical records, expired-but-unswept included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no records are present.
    #[allow(dead_code)]
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// TTL applied to every insertion.
    #[allow(dead_code)]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
