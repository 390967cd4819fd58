//! Image Cache Manager
//!
//! Maintains the `cached_image_` key space: startup expiry sweep, manual
//! clear, and size accounting. Every operation is best-effort and folds
//! store failures into a safe default.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{current_timestamp_ms, ImageRecord, IMAGE_KEY_PREFIX, IMAGE_TTL_MS};
use crate::error::CacheError;
use crate::report::SweepReport;
use crate::store::{keys_with_prefix, read_record, KvStore};

// == Image Cache Manager ==
/// Owns every entry under the `cached_image_` prefix.
#[derive(Clone)]
pub struct ImageCacheManager {
    store: Arc<dyn KvStore>,
}

impl ImageCacheManager {
    // == Constructor ==
    /// Creates a manager over the given store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Returns the store key for image `id`.
    pub fn key_for(id: &str) -> String {
        format!("{}{}", IMAGE_KEY_PREFIX, id)
    }

    // == Initialize ==
    /// Runs the startup expiry sweep. Never fails.
    pub async fn initialize(&self) -> SweepReport {
        let report = self.sweep_expired().await;
        info!(
            "Image cache initialized: scanned={}, marked={}, removed={}, failed={}",
            report.scanned,
            report.marked(),
            report.removed,
            report.failed
        );
        report
    }

    // == Sweep Expired ==
    /// Deletes entries older than the TTL as well as unparseable ones.
    pub async fn sweep_expired(&self) -> SweepReport {
        self.sweep_expired_at(current_timestamp_ms()).await
    }

    /// Sweeps against an explicit clock reading (Unix milliseconds).
    ///
    /// Marked keys are removed in a single batch after the scan; a key whose
    /// read fails is skipped and left for the next sweep.
    pub async fn sweep_expired_at(&self, now_ms: i64) -> SweepReport {
        let mut report = SweepReport::new();

        let keys = match keys_with_prefix(self.store.as_ref(), IMAGE_KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Image cache sweep skipped: {}", e);
                return report;
            }
        };

        let mut marked = Vec::new();
        for key in keys {
            report.record_scanned();
            match read_record::<ImageRecord>(self.store.as_ref(), &key).await {
                Ok(record) if record.is_expired_at(now_ms, IMAGE_TTL_MS) => {
                    report.record_expired();
                    marked.push(key);
                }
                Ok(_) => {}
                Err(CacheError::MalformedRecord { reason, .. }) => {
                    debug!("Discarding corrupt image entry {}: {}", key, reason);
                    report.record_corrupt();
                    marked.push(key);
                }
                Err(CacheError::KeyNotFound(_)) => {
                    debug!("Image entry {} vanished during sweep", key);
                }
                Err(e) => {
                    warn!("Skipping image entry {}: {}", key, e);
                    report.record_failed(1);
                }
            }
        }

        if marked.is_empty() {
            debug!("Image cache sweep: no expired entries found");
            return report;
        }

        match self.store.remove_many(&marked).await {
            Ok(()) => {
                info!("Image cache sweep: removed {} entries", marked.len());
                report.record_removed(marked.len());
            }
            Err(e) => {
                warn!("Image cache sweep failed to remove {} entries: {}", marked.len(), e);
                report.record_failed(marked.len());
            }
        }

        report
    }

    // == Clear ==
    /// Removes every cached image in one batch and returns how many keys
    /// were targeted. Returns 0 when the store fails.
    pub async fn clear(&self) -> usize {
        let keys = match keys_with_prefix(self.store.as_ref(), IMAGE_KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Image cache clear failed: {}", e);
                return 0;
            }
        };

        if keys.is_empty() {
            return 0;
        }

        match self.store.remove_many(&keys).await {
            Ok(()) => {
                info!("Image cache cleared: {} entries", keys.len());
                keys.len()
            }
            Err(e) => {
                warn!("Image cache clear failed: {}", e);
                0
            }
        }
    }

    // == Size ==
    /// Sums the serialized length of every cached image value.
    ///
    /// Length is counted in UTF-16 code units, matching how the app's
    /// JavaScript side measures string length. Returns 0 when the keys
    /// cannot be listed; unreadable individual values are skipped.
    pub async fn size(&self) -> usize {
        let keys = match keys_with_prefix(self.store.as_ref(), IMAGE_KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Image cache size unavailable: {}", e);
                return 0;
            }
        };

        let mut total = 0;
        for key in keys {
            match self.store.get(&key).await {
                Ok(Some(value)) => total += value.encode_utf16().count(),
                Ok(None) => {}
                Err(e) => warn!("Skipping image entry {} in size: {}", key, e),
            }
        }
        total
    }

    // == Cache Image ==
    /// Stores `data` for image `id`, stamped with the current time.
    ///
    /// Returns false if the record could not be written.
    pub async fn cache_image(&self, id: &str, data: Value) -> bool {
        let key = Self::key_for(id);
        let record = ImageRecord::new(data, current_timestamp_ms());

        let value = match serde_json::to_string(&record) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to encode image entry {}: {}", key, e);
                return false;
            }
        };

        match self.store.set(&key, value).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to cache image {}: {}", key, e);
                false
            }
        }
    }

    // == Cached Image ==
    /// Returns the live record for image `id`.
    ///
    /// Expired or corrupt entries are deleted on read and reported as absent.
    pub async fn cached_image(&self, id: &str) -> Option<ImageRecord> {
        let key = Self::key_for(id);

        match read_record::<ImageRecord>(self.store.as_ref(), &key).await {
            Ok(record) if !record.is_expired_at(current_timestamp_ms(), IMAGE_TTL_MS) => {
                Some(record)
            }
            Ok(_) | Err(CacheError::MalformedRecord { .. }) => {
                if let Err(e) = self.store.remove(&key).await {
                    warn!("Failed to drop stale image entry {}: {}", key, e);
                }
                None
            }
            Err(CacheError::KeyNotFound(_)) => None,
            Err(e) => {
                warn!("Failed to read image entry {}: {}", key, e);
                None
            }
        }
    }
}
