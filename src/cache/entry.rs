//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A cached payload with its lifetime and reporting metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached payload
    pub payload: Value,
    /// Namespace the entry was stored under (reporting only)
    pub namespace: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Approximate footprint in bytes, fixed at insertion
    pub size_bytes: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` after `now_ms`.
    ///
    /// # Arguments
    /// * `key` - Fingerprint the entry is stored under, counted in the size estimate
    /// * `namespace` - Reporting category
    /// * `payload` - The value to cache
    /// * `ttl_seconds` - Lifetime; 0 yields an entry that is already expired
    /// * `now_ms` - Insertion time
    pub fn new(key: &str, namespace: &str, payload: Value, ttl_seconds: u64, now_ms: u64) -> Self {
        let size_bytes = key.len() + namespace.len() + payload.to_string().len();

        Self {
            payload,
            namespace: namespace.to_string(),
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
            size_bytes,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now_ms`.
    ///
    /// Boundary condition: an entry is expired once the current time reaches
    /// the expiration time, so a zero TTL is never served.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
