//! Store Module
//!
//! Persistent key-value store capability consumed by the maintenance
//! components, plus in-memory and file-backed implementations.

mod file;
mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{CacheError, Result};

pub use file::FileStore;
pub use memory::MemoryStore;

// == Key-Value Store ==
/// Asynchronous string-keyed store with text values.
///
/// Removing an absent key is a successful no-op, so enumeration-then-delete
/// races between concurrent writers stay harmless.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns every key currently stored, in no particular order.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Returns the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or overwrites the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Deletes `key` if present.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Deletes every key in `keys` in one batch.
    async fn remove_many(&self, keys: &[String]) -> Result<()>;
}

/// Lists the keys starting with `prefix`.
pub async fn keys_with_prefix(store: &dyn KvStore, prefix: &str) -> Result<Vec<String>> {
    Ok(store
        .list_keys()
        .await?
        .into_iter()
        .filter(|key| key.starts_with(prefix))
        .collect())
}

/// Reads and decodes the JSON record stored under `key`.
///
/// Absent keys yield `KeyNotFound`; undecodable values yield `MalformedRecord`.
pub async fn read_record<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<T> {
    let raw = store
        .get(key)
        .await?
        .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| CacheError::malformed(key, e))
}
