//! Response DTOs for the cache management API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Snapshot of the cache
    pub cache_stats: CacheStats,
    /// Conventional TTL of this deployment, in seconds
    pub default_ttl_seconds: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse
    pub fn new(cache_stats: CacheStats, default_ttl_seconds: u64) -> Self {
        Self {
            cache_stats,
            default_ttl_seconds,
        }
    }
}

/// Response body for DELETE /cache and DELETE /cache/expired
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Human-readable summary
    pub message: String,
    /// Number of entries removed
    pub cleared_count: usize,
}

impl ClearResponse {
    /// Response for a full clear
    pub fn all(cleared_count: usize) -> Self {
        Self {
            message: format!("Cleared {} cached entries", cleared_count),
            cleared_count,
        }
    }

    /// Response for an expired-only clear
    pub fn expired(cleared_count: usize) -> Self {
        Self {
            message: format!("Cleared {} expired cache entries", cleared_count),
            cleared_count,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "Creator Analytics API".to_string(),
        }
    }
}
