//! Shared-Cart Cleanup Service
//!
//! Sweeps expired and corrupt shared carts, removes single carts on demand,
//! and counts the carts still active. Store failures never reach the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::current_timestamp_ms;
use crate::carts::{SharedCartRecord, SHARED_CART_KEY_PREFIX};
use crate::error::CacheError;
use crate::report::SweepReport;
use crate::store::{keys_with_prefix, read_record, KvStore};

// == Shared Cart Cleanup ==
/// Owns every entry under the `shared_cart_` prefix.
#[derive(Clone)]
pub struct SharedCartCleanup {
    store: Arc<dyn KvStore>,
}

impl SharedCartCleanup {
    // == Constructor ==
    /// Creates a cleanup service over the given store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Returns the store key for cart `cart_id`.
    pub fn key_for(cart_id: &str) -> String {
        format!("{}{}", SHARED_CART_KEY_PREFIX, cart_id)
    }

    // == Cleanup All ==
    /// Deletes every expired or corrupt shared cart.
    pub async fn cleanup_all(&self) -> SweepReport {
        self.cleanup_all_at(current_timestamp_ms()).await
    }

    /// Cleans up against an explicit clock reading (Unix milliseconds).
    ///
    /// Deletions happen inline as each key is classified. A failed read or
    /// delete skips that key and the scan carries on.
    pub async fn cleanup_all_at(&self, now_ms: i64) -> SweepReport {
        let mut report = SweepReport::new();

        let keys = match keys_with_prefix(self.store.as_ref(), SHARED_CART_KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Shared cart cleanup skipped: {}", e);
                return report;
            }
        };

        for key in keys {
            report.record_scanned();
            match read_record::<SharedCartRecord>(self.store.as_ref(), &key).await {
                Ok(record) if !record.is_active_at(now_ms) => {
                    report.record_expired();
                    self.remove_inline(&key, &mut report).await;
                }
                Ok(_) => {}
                Err(CacheError::MalformedRecord { reason, .. }) => {
                    debug!("Discarding corrupt shared cart {}: {}", key, reason);
                    report.record_corrupt();
                    self.remove_inline(&key, &mut report).await;
                }
                Err(CacheError::KeyNotFound(_)) => {
                    debug!("Shared cart {} vanished during cleanup", key);
                }
                Err(e) => {
                    warn!("Skipping shared cart {}: {}", key, e);
                    report.record_failed(1);
                }
            }
        }

        if report.removed > 0 {
            info!("Shared cart cleanup: removed {} entries", report.removed);
        } else {
            debug!("Shared cart cleanup: no expired entries found");
        }
        report
    }

    async fn remove_inline(&self, key: &str, report: &mut SweepReport) {
        match self.store.remove(key).await {
            Ok(()) => report.record_removed(1),
            Err(e) => {
                warn!("Failed to remove shared cart {}: {}", key, e);
                report.record_failed(1);
            }
        }
    }

    // == Cleanup One ==
    /// Removes the cart `cart_id` regardless of its deadline.
    ///
    /// Returns false if the store rejected the removal.
    pub async fn cleanup_one(&self, cart_id: &str) -> bool {
        let key = Self::key_for(cart_id);
        match self.store.remove(&key).await {
            Ok(()) => {
                info!("Removed shared cart {}", key);
                true
            }
            Err(e) => {
                warn!("Failed to remove shared cart {}: {}", key, e);
                false
            }
        }
    }

    // == Count Active ==
    /// Counts shared carts that have not expired.
    pub async fn count_active(&self) -> usize {
        self.count_active_at(current_timestamp_ms()).await
    }

    /// Counts against an explicit clock reading (Unix milliseconds).
    ///
    /// Corrupt and unreadable entries are not counted. Returns 0 when the
    /// keys cannot be listed.
    pub async fn count_active_at(&self, now_ms: i64) -> usize {
        let keys = match keys_with_prefix(self.store.as_ref(), SHARED_CART_KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Shared cart count unavailable: {}", e);
                return 0;
            }
        };

        let mut active = 0;
        for key in keys {
            match read_record::<SharedCartRecord>(self.store.as_ref(), &key).await {
                Ok(record) if record.is_active_at(now_ms) => active += 1,
                Ok(_) | Err(CacheError::KeyNotFound(_)) => {}
                Err(e) => debug!("Not counting shared cart {}: {}", key, e),
            }
        }
        active
    }
}
