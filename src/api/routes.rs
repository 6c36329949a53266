//! API Routes
//!
//! Configures the Axum router with the cache management endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_expired_handler, clear_handler, health_handler, root_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service banner
/// - `GET /health` - Health check endpoint
/// - `GET /cache/stats` - Cache statistics
/// - `DELETE /cache` - Remove every cached entry
/// - `DELETE /cache/expired` - Remove expired entries only
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/expired", delete(clear_expired_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
