//! API Handlers
//!
//! HTTP request handlers for the cache management endpoints.

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::{CacheStore, ResponseCache};
use crate::config::Config;
use crate::models::{ClearResponse, HealthResponse, RootResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the process-wide cache handle; engines receive clones of the same
/// handle from the composition root.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: ResponseCache,
    /// Conventional TTL reported by the stats endpoint
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: ResponseCache, default_ttl: u64) -> Self {
        Self { cache, default_ttl }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The store is capped only when `max_entries` is configured.
    pub fn from_config(config: &Config) -> Self {
        let store = match config.max_entries {
            Some(max) => CacheStore::with_capacity(max),
            None => CacheStore::new(),
        };
        Self::new(ResponseCache::new(store), config.default_ttl)
    }
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(stats, state.default_ttl))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear().await;
    info!("Cache cleared on request: {} entries", cleared);
    Json(ClearResponse::all(cleared))
}

/// Handler for DELETE /cache/expired
pub async fn clear_expired_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear_expired().await;
    Json(ClearResponse::expired(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::default())
}
