//! Image Cache Module
//!
//! Best-effort maintenance of cached images kept in the shared store.

mod entry;
mod manager;


// Re-export public types
pub use entry::{current_timestamp_ms, ImageRecord};
pub use manager::ImageCacheManager;

// == Public Constants ==
/// Key prefix reserved for cached images
pub const IMAGE_KEY_PREFIX: &str = "cached_image_";

/// Age after which a cached image is evicted (30 days, in milliseconds)
pub const IMAGE_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;
