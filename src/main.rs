//! PinShare server: share links, gateway resolution and pinned uploads
//! over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use pinshare_core::config::AppConfig;
use pinshare_core::error::AppError;
use pinshare_core::traits::clock::SystemClock;
use pinshare_pinning::MemoryFileStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("PINSHARE_CONFIG") {
        Ok(path) => AppConfig::load_from(&path),
        Err(_) => {
            let env =
                std::env::var("PINSHARE_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PinShare v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: File record store ────────────────────────────────
    let store = Arc::new(MemoryFileStore::new(&config.storage));
    tracing::info!(
        max_records = config.storage.max_records,
        "File record store initialized"
    );

    // ── Step 2: Wire share, gateway and pinning components ───────
    if !config.pinning.is_configured() {
        tracing::warn!("Pinning API keys not configured; uploads are disabled");
    }
    tracing::info!(
        gateways = config.gateway.gateways.len(),
        origin = %config.share.public_origin,
        scheme = ?config.share.verification_scheme,
        "Share components configured"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = pinshare_api::AppState::new(config, Arc::new(SystemClock), store)?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = pinshare_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("PinShare server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });
    let mut server_task = tokio::spawn(async move { server.await });

    let joined = tokio::select! {
        joined = &mut server_task => joined,
        _ = shutdown_rx.changed() => match tokio::time::timeout(grace, &mut server_task).await {
            Ok(joined) => joined,
            Err(_) => {
                tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
                server_task.abort();
                return Ok(());
            }
        },
    };

    joined
        .map_err(|e| AppError::internal(format!("Server task failed: {}", e)))?
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("PinShare server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
