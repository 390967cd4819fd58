//! Shared Cart Module
//!
//! Cleanup of shared-cart records whose `expiresAt` deadline has passed.

mod record;
mod service;

pub use record::SharedCartRecord;
pub use service::SharedCartCleanup;

/// Key prefix reserved for shared carts; the cart id follows directly
pub const SHARED_CART_KEY_PREFIX: &str = "shared_cart_";
