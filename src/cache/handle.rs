//! Shared Cache Handle
//!
//! Cloneable handle around a lock-protected [`CacheStore`], handed to the
//! engines and HTTP handlers that need the cache.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheParams, CacheStats, CacheStore};
use crate::error::{CacheError, Result};

// == Response Cache ==
/// Thread-safe handle to a single [`CacheStore`].
///
/// Clones share the same store. The lock is only held for the in-memory
/// operation itself, never across a fetch.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl ResponseCache {
    // == Constructor ==
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // == Untyped Access ==
    /// Returns the payload for `(namespace, params)` if present and fresh.
    ///
    /// Takes the write lock: reads update the hit/miss counters.
    pub async fn get(&self, namespace: &str, params: &CacheParams) -> Option<Value> {
        self.inner.write().await.get(namespace, params)
    }

    /// Stores `payload` for `(namespace, params)` for `ttl_seconds`.
    pub async fn set(&self, namespace: &str, payload: Value, ttl_seconds: u64, params: &CacheParams) {
        self.inner
            .write()
            .await
            .set(namespace, payload, ttl_seconds, params);
    }

    pub async fn clear(&self) -> usize {
        self.inner.write().await.clear()
    }

    pub async fn clear_expired(&self) -> usize {
        self.inner.write().await.clear_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    // == Typed Access ==
    /// Returns the cached payload decoded as `T`.
    ///
    /// # Errors
    /// `CacheError::InvalidPayload` if the stored payload does not have the
    /// shape of `T`.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        namespace: &str,
        params: &CacheParams,
    ) -> Result<Option<T>> {
        match self.get(namespace, params).await {
            Some(payload) => decode(namespace, payload).map(Some),
            None => Ok(None),
        }
    }

    /// Encodes `payload` and stores it.
    ///
    /// # Errors
    /// `CacheError::InvalidPayload` if `payload` cannot be represented as JSON.
    pub async fn set_as<T: Serialize + ?Sized>(
        &self,
        namespace: &str,
        payload: &T,
        ttl_seconds: u64,
        params: &CacheParams,
    ) -> Result<()> {
        let payload = encode(namespace, payload)?;
        self.set(namespace, payload, ttl_seconds, params).await;
        Ok(())
    }

    // == Read-Through ==
    /// Returns the cached value for `(namespace, params)`, or runs `fetch`,
    /// caches its successful result for `ttl_seconds` and returns it.
    ///
    /// `fetch` runs without holding the lock. A failed fetch is returned as
    /// is and nothing is cached. Concurrent misses for the same fingerprint
    /// each run their own fetch; the last one to finish wins.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        namespace: &str,
        params: &CacheParams,
        ttl_seconds: u64,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(cached) = self.get_as::<T>(namespace, params).await? {
            return Ok(cached);
        }

        debug!("Fetching fresh value for {}", namespace);
        let value = fetch().await?;
        self.set_as(namespace, &value, ttl_seconds, params).await?;
        Ok(value)
    }
}

fn encode<T: Serialize + ?Sized>(namespace: &str, payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| {
        CacheError::InvalidPayload(format!("cannot encode payload for {}: {}", namespace, e))
    })
}

fn decode<T: DeserializeOwned>(namespace: &str, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| {
        CacheError::InvalidPayload(format!("cannot decode payload for {}: {}", namespace, e))
    })
}
