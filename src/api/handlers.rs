//! API Handlers
//!
//! HTTP request handlers for the maintenance endpoints. Maintenance results
//! are always best-effort; only malformed requests produce an error status.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::ImageCacheManager;
use crate::carts::SharedCartCleanup;
use crate::error::{CacheError, Result};
use crate::models::{
    ActiveCartsResponse, CartRemovedResponse, ClearResponse, HealthResponse, SizeResponse,
};
use crate::report::SweepReport;
use crate::store::KvStore;

/// Maximum accepted cart id length in bytes
pub const MAX_CART_ID_LENGTH: usize = 256;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Image cache maintenance
    pub images: ImageCacheManager,
    /// Shared-cart maintenance
    pub carts: SharedCartCleanup,
}

impl AppState {
    /// Creates a new AppState with both components over one store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            images: ImageCacheManager::new(store.clone()),
            carts: SharedCartCleanup::new(store),
        }
    }
}

/// Handler for GET /images/size
pub async fn image_size_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    Json(SizeResponse {
        bytes: state.images.size().await,
    })
}

/// Handler for POST /images/sweep
pub async fn image_sweep_handler(State(state): State<AppState>) -> Json<SweepReport> {
    Json(state.images.sweep_expired().await)
}

/// Handler for DELETE /images
pub async fn image_clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse {
        removed: state.images.clear().await,
    })
}

/// Handler for POST /carts/cleanup
pub async fn cart_cleanup_handler(State(state): State<AppState>) -> Json<SweepReport> {
    Json(state.carts.cleanup_all().await)
}

/// Handler for GET /carts/active
pub async fn active_carts_handler(State(state): State<AppState>) -> Json<ActiveCartsResponse> {
    Json(ActiveCartsResponse {
        active: state.carts.count_active().await,
    })
}

/// Handler for DELETE /carts/:cart_id
///
/// Removes the cart unconditionally, whatever its deadline.
pub async fn cart_remove_handler(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Result<Json<CartRemovedResponse>> {
    if cart_id.is_empty() {
        return Err(CacheError::InvalidRequest(
            "Cart id cannot be empty".to_string(),
        ));
    }
    if cart_id.len() > MAX_CART_ID_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Cart id exceeds maximum length of {} bytes",
            MAX_CART_ID_LENGTH
        )));
    }

    let removed = state.carts.cleanup_one(&cart_id).await;
    Ok(Json(CartRemovedResponse::new(cart_id, removed)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
