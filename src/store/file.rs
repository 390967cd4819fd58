//! File-backed persistent store
//!
//! Keeps the whole key space as one JSON object on disk, mirrored in memory.
//! Every mutation rewrites the file atomically through a temp file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::KvStore;
use crate::error::{CacheError, Result};

// == File Store ==
/// Persistent [`KvStore`] stored as a JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// Fails with `StoreUnavailable` if the file exists but cannot be read
    /// or does not hold a JSON object of string values.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries: HashMap<String, String> = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                CacheError::StoreUnavailable(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!("Opened store at {:?} with {} keys", path, entries.len());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Returns the file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written before the rename into place.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes `entries` to disk via a temp file and rename.
    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec(entries)
            .map_err(|e| CacheError::StoreUnavailable(e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Persisted {} keys to {:?}", entries.len(), self.path);
        Ok(())
    }

    /// Persists `next`, then swaps it in. On failure memory keeps matching disk.
    async fn commit(
        &self,
        entries: &mut HashMap<String, String>,
        next: HashMap<String, String>,
    ) -> Result<()> {
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.commit(&mut entries, next).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.commit(&mut entries, next).await
    }

    async fn remove_many(&self, keys: &[String]) -> Result<()> {
        let mut entries = self.entries.write().await;
        if !keys.iter().any(|key| entries.contains_key(key)) {
            return Ok(());
        }
        let mut next = entries.clone();
        for key in keys {
            next.remove(key);
        }
        self.commit(&mut entries, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).await.unwrap();

        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.set("a", "1".to_string()).await.unwrap();
            store.set("b", "2".to_string()).await.unwrap();
            store.remove("b").await.unwrap();
        }

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_many_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.set("a", "1".to_string()).await.unwrap();
            store.set("b", "2".to_string()).await.unwrap();
            store.set("c", "3".to_string()).await.unwrap();
            store
                .remove_many(&["a".to_string(), "c".to_string()])
                .await
                .unwrap();
        }

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).await.unwrap();

        store.remove("missing").await.unwrap();
        store.remove_many(&["missing".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        let store = FileStore::open(sub.join("store.json")).await.unwrap();
        store
            .set("shared_cart_abc123", "{}".to_string())
            .await
            .unwrap();

        // Replace the parent directory with a plain file so writes fail
        tokio::fs::remove_dir_all(&sub).await.unwrap();
        tokio::fs::write(&sub, b"blocker").await.unwrap();

        let result = store.remove("shared_cart_abc123").await;
        assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
        assert_eq!(
            store.get("shared_cart_abc123").await.unwrap(),
            Some("{}".to_string())
        );

        let result = store
            .remove_many(&["shared_cart_abc123".to_string()])
            .await;
        assert!(result.is_err());
        assert_eq!(store.list_keys().await.unwrap(), vec!["shared_cart_abc123"]);

        assert!(store.set("cached_image_x", "v".to_string()).await.is_err());
        assert_eq!(store.get("cached_image_x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tmp_suffixed_path_is_replaced_atomically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.tmp");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.set("a", "1".to_string()).await.unwrap();
        }

        let store = FileStore::open(&path).await.unwrap();
        assert_eq!(store.temp_path(), dir.path().join("store.tmp.tmp"));
        assert!(!store.temp_path().exists());
        assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_open_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let result = FileStore::open(&path).await;
        assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
    }
}
