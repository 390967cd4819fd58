//! Periodic Sweep Task
//!
//! Background task that re-runs the image sweep and shared-cart cleanup.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ImageCacheManager;
use crate::carts::SharedCartCleanup;
use crate::report::SweepReport;

/// Runs one maintenance pass over both key spaces and returns the combined report.
pub async fn run_sweep(images: &ImageCacheManager, carts: &SharedCartCleanup) -> SweepReport {
    let mut report = images.sweep_expired().await;
    report.merge(&carts.cleanup_all().await);
    report
}

/// Spawns a background task that periodically sweeps both key spaces.
///
/// The task sleeps for the interval before each pass, so the startup sweep
/// is left to the caller.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweep_task(images.clone(), carts.clone(), 3600);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task(
    images: ImageCacheManager,
    carts: SharedCartCleanup,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let report = run_sweep(&images, &carts).await;

            if report.removed > 0 {
                info!(
                    "Sweep: removed {} entries ({} expired, {} corrupt)",
                    report.removed, report.expired, report.corrupt
                );
            } else {
                debug!("Sweep: no expired entries found");
            }
        }
    })
}
