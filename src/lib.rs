//! Response Cache - in-process cache for the creator analytics backend
//!
//! Engines fingerprint their external API queries by namespace and
//! parameters and reuse results until their TTL runs out. The management
//! API reports statistics and clears entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheParams, CacheStore, ResponseCache};
pub use config::Config;
pub use error::CacheError;
