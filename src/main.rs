//! Cache Sweeper - maintenance daemon for the image cache and shared carts
//!
//! Sweeps both key spaces at startup, keeps sweeping on an interval, and
//! exposes the maintenance operations over a small admin API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_sweeper::api::{create_router, AppState};
use cache_sweeper::{spawn_sweep_task, Config, FileStore, KvStore, MemoryStore};

/// Main entry point for the maintenance daemon.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the persistent store
/// 4. Run the startup image sweep and shared-cart cleanup
/// 5. Start the background sweep task
/// 6. Serve the admin API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_sweeper=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cache Sweeper");

    let config = Config::from_env();
    info!(
        "Configuration loaded: store_path={:?}, port={}, sweep_interval={}s",
        config.store_path, config.server_port, config.sweep_interval
    );

    let store: Arc<dyn KvStore> = match &config.store_path {
        Some(path) => {
            let store = FileStore::open(path)
                .await
                .with_context(|| format!("failed to open store at {}", path))?;
            info!("Using persistent store at {}", store.path().display());
            Arc::new(store)
        }
        None => {
            warn!("No STORE_PATH set, entries will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store);

    state.images.initialize().await;
    let report = state.carts.cleanup_all().await;
    info!(
        "Startup cart cleanup: scanned={}, removed={}",
        report.scanned, report.removed
    );

    let sweep_handle = if config.sweep_interval > 0 {
        Some(spawn_sweep_task(
            state.images.clone(),
            state.carts.clone(),
            config.sweep_interval,
        ))
    } else {
        info!("Background sweep disabled");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweep task.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Sweep task aborted");
    }
}
