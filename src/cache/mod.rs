//! Cache Module
//!
//! In-process response cache keyed by `(namespace, parameters)` with lazy
//! TTL expiration.

mod entry;
mod handle;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use handle::ResponseCache;
pub use key::{cache_key, CacheParams};
pub use stats::{CacheCounters, CacheStats, NamespaceStats};
pub use store::CacheStore;

pub(crate) use lru::RecencyIndex;

// == TTL Conventions ==
/// Conventional lifetimes used by the engines, in seconds. The store has no
/// default of its own; every `set` passes a TTL explicitly.
pub mod ttl {
    /// General-purpose API responses
    pub const DEFAULT: u64 = 300;
    /// Generated product links
    pub const PRODUCT_LINKS: u64 = 1800;
    /// Affiliate program discovery results
    pub const DISCOVERY: u64 = 3600;
}
