//! Cache Statistics Module
//!
//! Read counters kept by the store and the point-in-time snapshot reported
//! to operators.

use std::collections::BTreeMap;

use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// == Cache Counters ==
/// Running hit/miss/eviction counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheCounters {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped to respect the capacity cap
    pub evictions: u64,
}

impl CacheCounters {
    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Namespace Stats ==
/// Active/expired split for one namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceStats {
    pub active: usize,
    pub expired: usize,
}

// == Cache Stats ==
/// Snapshot of the cache evaluated at a single instant.
///
/// `approx_size_bytes` and `cache_size_mb` are estimates: each entry
/// contributes the length of its serialized payload, key and namespace as
/// measured when it was stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// All stored entries, expired or not
    pub total_entries: usize,
    /// Entries still fresh at the snapshot instant
    pub active_entries: usize,
    /// Entries past their expiry but not yet cleared
    pub expired_entries: usize,
    /// Per-namespace active/expired counts
    pub namespace_breakdown: BTreeMap<String, NamespaceStats>,
    /// Estimated footprint in bytes
    pub approx_size_bytes: usize,
    /// Estimated footprint in MiB, rounded to two decimals
    pub cache_size_mb: f64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates an empty snapshot carrying the given counters.
    pub fn new(counters: CacheCounters) -> Self {
        Self {
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            hit_rate: counters.hit_rate(),
            ..Self::default()
        }
    }

    // == Record Entry ==
    /// Accounts one stored entry into the snapshot.
    pub fn record_entry(&mut self, namespace: &str, expired: bool, size_bytes: usize) {
        let ns = self
            .namespace_breakdown
            .entry(namespace.to_string())
            .or_default();

        if expired {
            self.expired_entries += 1;
            ns.expired += 1;
        } else {
            self.active_entries += 1;
            ns.active += 1;
        }

        self.total_entries += 1;
        self.approx_size_bytes += size_bytes;
        self.cache_size_mb = (self.approx_size_bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0;
    }
}
