//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised at the typed edges of the cache.
///
/// The store itself never fails; these are caller contract violations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A key parameter could not be serialized
    #[error("Invalid cache parameters: {0}")]
    InvalidParams(String),

    /// A payload could not be encoded, or decoded as the requested type
    #[error("Invalid cache payload: {0}")]
    InvalidPayload(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidParams(_) | CacheError::InvalidPayload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
