//! API Module
//!
//! HTTP handlers and routing for the cache management API.
//!
//! # Endpoints
//! - `GET /cache/stats` - Cache statistics
//! - `DELETE /cache` - Clear every entry
//! - `DELETE /cache/expired` - Clear expired entries
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
