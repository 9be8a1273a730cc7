//! Caching Proxy - A caching reverse proxy server
//!
//! Forwards requests to a configured origin and serves repeated GETs from
//! a TTL-bound cache, backed by memory or disk.

mod cache;
mod config;
mod error;
mod models;
mod proxy;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache::{DiskStore, ResponseCache, TtlStore};
use config::{BackendKind, Config};
use proxy::{create_router, AppState, UpstreamClient};
use tasks::{spawn_sweeper, SweeperHandle};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the configured cache backend
/// 4. Start the background expiry sweeper (memory backend only)
/// 5. Create Axum router with admin routes and the proxy fallback
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caching_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Caching Proxy");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: origin={}, ttl={}s, port={}, cleanup_interval={}s",
        config.origin, config.cache_ttl, config.server_port, config.cleanup_interval
    );

    // Build the configured backend; only the memory backend needs a sweeper
    let mut sweeper: Option<SweeperHandle> = None;
    let cache = match config.backend {
        BackendKind::Memory => {
            let store = Arc::new(TtlStore::new(config.ttl()));
            sweeper = Some(spawn_sweeper(store.clone(), config.sweep_interval()));
            info!("Background sweeper started");
            ResponseCache::memory(store)
        }
        BackendKind::Disk => {
            let store = DiskStore::new(config.cache_dir.clone());
            store.init().await?;
            ResponseCache::disk(store)
        }
    };
    info!("Cache initialized with {} backend", cache.backend_name());

    // Create router with admin endpoints and the proxy fallback
    let state = AppState::new(cache, UpstreamClient::new(&config.origin));
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Proxy listening on http://{} -> {}", addr, config.origin);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the sweeper cooperatively once the server has drained
    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
        info!("Sweeper stopped");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
}
