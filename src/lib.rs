//! Cache Sweeper - best-effort TTL maintenance over a persistent key-value store
//!
//! Evicts stale cached images and expired shared carts, each kept under its
//! own key prefix, without ever failing the caller.

pub mod api;
pub mod cache;
pub mod carts;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::ImageCacheManager;
pub use carts::SharedCartCleanup;
pub use config::Config;
pub use report::SweepReport;
pub use store::{FileStore, KvStore, MemoryStore};
pub use tasks::spawn_sweep_task;
