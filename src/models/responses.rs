//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for GET /images/size
#[derive(Debug, Clone, Serialize)]
pub struct SizeResponse {
    /// Total serialized length of all cached images
    pub bytes: usize,
}

/// Response body for DELETE /images
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of cached images removed
    pub removed: usize,
}

/// Response body for GET /carts/active
#[derive(Debug, Clone, Serialize)]
pub struct ActiveCartsResponse {
    /// Number of shared carts not yet expired
    pub active: usize,
}

/// Response body for DELETE /carts/:cart_id
#[derive(Debug, Clone, Serialize)]
pub struct CartRemovedResponse {
    /// Outcome message
    pub message: String,
    /// The cart that was targeted
    pub cart_id: String,
    /// Whether the store accepted the removal
    pub removed: bool,
}

impl CartRemovedResponse {
    /// Creates a new CartRemovedResponse
    pub fn new(cart_id: impl Into<String>, removed: bool) -> Self {
        let cart_id = cart_id.into();
        let message = if removed {
            format!("Shared cart '{}' removed", cart_id)
        } else {
            format!("Shared cart '{}' could not be removed", cart_id)
        };
        Self {
            message,
            cart_id,
            removed,
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

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
