//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::num::NonZeroUsize;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Conventional TTL in seconds, reported by the stats endpoint
    pub default_ttl: u64,
    /// Optional entry cap; `None` keeps the cache unbounded
    pub max_entries: Option<NonZeroUsize>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DEFAULT_TTL` - Conventional TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Entry cap, 0 or unset for unbounded (default: unset)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            max_entries: parse_var::<usize>("CACHE_MAX_ENTRIES").and_then(NonZeroUsize::new),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            default_ttl: crate::cache::ttl::DEFAULT,
            max_entries: None,
        }
    }
}
