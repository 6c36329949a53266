//! Cache Store Module
//!
//! Main cache engine: fingerprinted entries with lazy TTL expiration and an
//! optional LRU capacity cap.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{cache_key, CacheCounters, CacheEntry, CacheParams, CacheStats, RecencyIndex};

/// Characters of the fingerprint shown in log lines.
const LOG_KEY_PREFIX: usize = 8;

// == Cache Store ==
/// In-memory response cache.
///
/// Expired entries are never served but stay in storage until
/// [`clear_expired`](Self::clear_expired), [`clear`](Self::clear) or an
/// overwriting [`set`](Self::set) removes them. Without a capacity cap the
/// store grows with the number of distinct fingerprints; operators are
/// expected to call `clear_expired` periodically.
///
/// Every time-dependent operation has an `_at` variant taking the current
/// time in Unix milliseconds.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Fingerprint -> entry
    entries: HashMap<String, CacheEntry>,
    /// Use order, maintained only when a cap is set
    recency: RecencyIndex,
    /// Read and eviction counters
    counters: CacheCounters,
    /// Optional entry cap
    max_entries: Option<NonZeroUsize>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding at most `max_entries` entries.
    pub fn with_capacity(max_entries: NonZeroUsize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    // == Get ==
    /// Returns the payload stored for `(namespace, params)` if it has not
    /// expired.
    pub fn get(&mut self, namespace: &str, params: &CacheParams) -> Option<Value> {
        self.get_at(namespace, params, current_timestamp_ms())
    }

    pub fn get_at(&mut self, namespace: &str, params: &CacheParams, now_ms: u64) -> Option<Value> {
        let key = cache_key(namespace, params);

        match self.entries.get(&key) {
            None => {
                self.counters.record_miss();
                debug!("Cache miss for {} - key: {}...", namespace, &key[..LOG_KEY_PREFIX]);
                None
            }
            Some(entry) if entry.is_expired_at(now_ms) => {
                self.counters.record_miss();
                debug!("Cache expired for {} - key: {}...", namespace, &key[..LOG_KEY_PREFIX]);
                None
            }
            Some(entry) => {
                let payload = entry.payload.clone();
                self.counters.record_hit();
                if self.max_entries.is_some() {
                    self.recency.touch(&key);
                }
                debug!("Cache hit for {} - key: {}...", namespace, &key[..LOG_KEY_PREFIX]);
                Some(payload)
            }
        }
    }

    // == Set ==
    /// Stores `payload` for `(namespace, params)`, replacing any previous
    /// entry with the same fingerprint.
    ///
    /// A `ttl_seconds` of 0 is accepted; the entry is expired immediately.
    pub fn set(&mut self, namespace: &str, payload: Value, ttl_seconds: u64, params: &CacheParams) {
        self.set_at(namespace, payload, ttl_seconds, params, current_timestamp_ms())
    }

    pub fn set_at(
        &mut self,
        namespace: &str,
        payload: Value,
        ttl_seconds: u64,
        params: &CacheParams,
        now_ms: u64,
    ) {
        let key = cache_key(namespace, params);

        if let Some(max) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max.get() {
                self.make_room(max.get(), now_ms);
            }
            self.recency.touch(&key);
        }

        let entry = CacheEntry::new(&key, namespace, payload, ttl_seconds, now_ms);
        debug!(
            "Cached response for {} - key: {}... (TTL: {}s)",
            namespace,
            &key[..LOG_KEY_PREFIX],
            ttl_seconds
        );
        self.entries.insert(key, entry);
    }

    /// Frees at least one slot: drops expired entries first, then the least
    /// recently used ones.
    fn make_room(&mut self, max: usize, now_ms: u64) {
        let purged = self.purge_expired(now_ms);
        debug!("Purged {} expired entries to make room", purged);

        while self.entries.len() >= max {
            let Some(oldest) = self.recency.pop_oldest() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                self.counters.record_eviction();
                info!(
                    "Evicted least recently used entry for {} - key: {}...",
                    evicted.namespace,
                    &oldest[..LOG_KEY_PREFIX]
                );
            }
        }
    }

    // == Clear ==
    /// Removes every entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.recency.clear();
        info!("Cleared {} cache entries", count);
        count
    }

    // == Clear Expired ==
    /// Removes the entries that have expired and returns how many were
    /// removed.
    pub fn clear_expired(&mut self) -> usize {
        self.clear_expired_at(current_timestamp_ms())
    }

    pub fn clear_expired_at(&mut self, now_ms: u64) -> usize {
        let count = self.purge_expired(now_ms);
        if count > 0 {
            info!("Cleared {} expired cache entries", count);
        } else {
            debug!("No expired cache entries to clear");
        }
        count
    }

    fn purge_expired(&mut self, now_ms: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.recency.remove(&key);
        }

        count
    }

    // == Stats ==
    /// Returns a snapshot of the cache. Expired entries are counted, not
    /// removed.
    pub fn stats(&self) -> CacheStats {
        self.stats_at(current_timestamp_ms())
    }

    pub fn stats_at(&self, now_ms: u64) -> CacheStats {
        let mut stats = CacheStats::new(self.counters);
        for entry in self.entries.values() {
            stats.record_entry(&entry.namespace, entry.is_expired_at(now_ms), entry.size_bytes);
        }
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: u64 = 1_700_000_000_000;

    fn keywords(words: &[&str]) -> CacheParams {
        CacheParams::new().with("keywords", words).unwrap()
    }

    fn capped(max: usize) -> CacheStore {
        CacheStore::with_capacity(NonZeroUsize::new(max).unwrap())
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();
        let payload = json!({"programs": [{"name": "Amazon Associates"}]});

        store.set("affiliate_discovery", payload.clone(), 3600, &keywords(&["gaming", "mouse"]));

        assert_eq!(
            store.get("affiliate_discovery", &keywords(&["gaming", "mouse"])),
            Some(payload)
        );
        assert_eq!(store.get("affiliate_discovery", &keywords(&["gaming", "keyboard"])), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_namespace_is_part_of_key() {
        let mut store = CacheStore::new();
        let params = keywords(&["gaming"]);

        store.set("affiliate_discovery", json!(1), 3600, &params);

        assert_eq!(store.get("affiliate_links", &params), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();
        let params = keywords(&["protein powder"]);

        store.set("affiliate_discovery", json!("first"), 3600, &params);
        store.set("affiliate_discovery", json!("second"), 3600, &params);

        assert_eq!(store.get("affiliate_discovery", &params), Some(json!("second")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_zero_ttl_is_never_served() {
        let mut store = CacheStore::new();
        let params = keywords(&["x"]);

        store.set_at("ns", json!(1), 0, &params, NOW);

        assert_eq!(store.get_at("ns", &params, NOW), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lazy_expiration() {
        let mut store = CacheStore::new();
        let params = keywords(&["x"]);

        store.set_at("ns", json!(1), 300, &params, NOW);
        assert_eq!(store.get_at("ns", &params, NOW + 299_999), Some(json!(1)));
        assert_eq!(store.get_at("ns", &params, NOW + 300_000), None);

        // Still physically stored until an explicit cleanup
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats_at(NOW + 300_000).expired_entries, 1);
    }

    #[test]
    fn test_store_overwrite_replaces_expired_entry() {
        let mut store = CacheStore::new();
        let params = keywords(&["x"]);

        store.set_at("ns", json!("old"), 1, &params, NOW);
        store.set_at("ns", json!("new"), 60, &params, NOW + 5_000);

        assert_eq!(store.get_at("ns", &params, NOW + 6_000), Some(json!("new")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new();
        store.set("a", json!(1), 60, &CacheParams::new());
        store.set("b", json!(2), 0, &CacheParams::new());

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.stats().total_entries, 0);
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn test_store_clear_expired() {
        let mut store = CacheStore::new();
        store.set_at("short", json!(1), 1, &CacheParams::new(), NOW);
        store.set_at("long", json!(2), 3600, &CacheParams::new(), NOW);
        store.set_at("zero", json!(3), 0, &CacheParams::new(), NOW);

        let removed = store.clear_expired_at(NOW + 1_500);

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_at("long", &CacheParams::new(), NOW + 1_500), Some(json!(2)));
        assert_eq!(store.clear_expired_at(NOW + 1_500), 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();
        store.set_at("affiliate_discovery", json!({"a": 1}), 3600, &keywords(&["a"]), NOW);
        store.set_at("affiliate_discovery", json!({"b": 2}), 1, &keywords(&["b"]), NOW);
        store.set_at("affiliate_links", json!([1, 2]), 1800, &keywords(&["c"]), NOW);

        store.get_at("affiliate_discovery", &keywords(&["a"]), NOW); // hit
        store.get_at("affiliate_discovery", &keywords(&["b"]), NOW + 2_000); // miss (expired)
        store.get_at("affiliate_links", &keywords(&["zzz"]), NOW); // miss

        let stats = store.stats_at(NOW + 2_000);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.active_entries, 2);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.namespace_breakdown["affiliate_discovery"].active, 1);
        assert_eq!(stats.namespace_breakdown["affiliate_discovery"].expired, 1);
        assert_eq!(stats.namespace_breakdown["affiliate_links"].active, 1);
        assert!(stats.approx_size_bytes > 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);

        // Reporting does not evict
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_capped_store_evicts_least_recently_used() {
        let mut store = capped(3);
        for name in ["a", "b", "c"] {
            store.set_at(name, json!(name), 3600, &CacheParams::new(), NOW);
        }

        // Reading "a" makes "b" the oldest
        assert!(store.get_at("a", &CacheParams::new(), NOW).is_some());
        store.set_at("d", json!("d"), 3600, &CacheParams::new(), NOW);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get_at("b", &CacheParams::new(), NOW), None);
        assert!(store.get_at("a", &CacheParams::new(), NOW).is_some());
        assert_eq!(store.stats_at(NOW).evictions, 1);
    }

    #[test]
    fn test_capped_store_prefers_dropping_expired() {
        let mut store = capped(2);
        store.set_at("stale", json!(1), 1, &CacheParams::new(), NOW);
        store.set_at("fresh", json!(2), 3600, &CacheParams::new(), NOW);

        store.set_at("new", json!(3), 3600, &CacheParams::new(), NOW + 5_000);

        assert_eq!(store.len(), 2);
        assert!(store.get_at("fresh", &CacheParams::new(), NOW + 5_000).is_some());
        assert_eq!(store.stats_at(NOW + 5_000).evictions, 0);
    }

    #[test]
    fn test_capped_store_full_of_fresh_entries_evicts_per_insert() {
        let mut store = capped(2);
        store.set_at("a", json!(1), 3600, &CacheParams::new(), NOW);
        store.set_at("b", json!(2), 3600, &CacheParams::new(), NOW);

        for (i, name) in ["c", "d", "e"].into_iter().enumerate() {
            store.set_at(name, json!(name), 3600, &CacheParams::new(), NOW + i as u64);
            assert_eq!(store.len(), 2);
        }

        // Nothing expired along the way, so every slot came from an eviction
        assert_eq!(store.stats_at(NOW).evictions, 3);
        assert_eq!(store.stats_at(NOW).expired_entries, 0);
        assert_eq!(store.clear_expired_at(NOW), 0);
        assert!(store.get_at("e", &CacheParams::new(), NOW).is_some());
    }

    #[test]
    fn test_capped_store_overwrite_does_not_evict() {
        let mut store = capped(2);
        store.set_at("a", json!(1), 3600, &CacheParams::new(), NOW);
        store.set_at("b", json!(2), 3600, &CacheParams::new(), NOW);
        store.set_at("a", json!(3), 3600, &CacheParams::new(), NOW);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats_at(NOW).evictions, 0);
    }
}
