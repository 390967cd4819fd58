//! Error types for cache maintenance
//!
//! Provides unified error handling using thiserror. Maintenance operations
//! recover from every variant internally; only the admin API surfaces them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for store access and record decoding.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store could not be reached or failed the operation
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored value is not valid JSON or lacks the expected field
    #[error("Malformed record at {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    /// Key is absent from the store
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Invalid admin request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Builds a `MalformedRecord` from a JSON decoding failure.
    pub fn malformed(key: impl Into<String>, err: serde_json::Error) -> Self {
        CacheError::MalformedRecord {
            key: key.into(),
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::StoreUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::MalformedRecord { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache maintenance.
pub type Result<T> = std::result::Result<T, CacheError>;
