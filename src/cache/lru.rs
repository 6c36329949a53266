//! Recency Index Module
//!
//! Orders fingerprints by last use so a capped store can evict the least
//! recently used entry.

use std::collections::{BTreeMap, HashMap};

// == Recency Index ==
/// Tracks use order with a monotonic tick per fingerprint.
///
/// `by_tick` holds the inverse mapping, so the oldest fingerprint is the
/// first element and touch/remove stay logarithmic.
#[derive(Debug, Default)]
pub struct RecencyIndex {
    tick: u64,
    by_key: HashMap<String, u64>,
    by_tick: BTreeMap<u64, String>,
}

impl RecencyIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a fingerprint as most recently used.
    pub fn touch(&mut self, key: &str) {
        self.tick += 1;
        if let Some(old) = self.by_key.insert(key.to_string(), self.tick) {
            self.by_tick.remove(&old);
        }
        self.by_tick.insert(self.tick, key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(old) = self.by_key.remove(key) {
            self.by_tick.remove(&old);
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used fingerprint.
    pub fn pop_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.by_key.remove(&key);
        Some(key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_tick.clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
