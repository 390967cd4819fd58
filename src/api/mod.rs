//! API Module
//!
//! HTTP handlers and routing for the maintenance admin API.
//!
//! # Endpoints
//! - `GET /images/size` - Total serialized size of cached images
//! - `POST /images/sweep` - Evict expired and corrupt cached images
//! - `DELETE /images` - Remove every cached image
//! - `POST /carts/cleanup` - Evict expired and corrupt shared carts
//! - `GET /carts/active` - Count shared carts still active
//! - `DELETE /carts/:cart_id` - Remove one shared cart
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
