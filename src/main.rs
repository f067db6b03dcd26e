// This is the entry point for the image converter service.
// The lib.rs file holds everything else so integration tests can drive the router.

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use image_converter::{AppState, Config, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load(&Config::default_path()) {
        Ok(config) => Ok(config),
        Err(e) if is_missing_file(&e) => Err(e),
        Err(e) => return Err(e.context("invalid configuration file")),
    };
    let loaded_from_file = config.is_ok();
    let config = config.unwrap_or_default().apply_env_overrides()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_target(false)       // Remove module path
        .compact()
        .init();

    info!("=== Image converter v{} starting ===", env!("CARGO_PKG_VERSION"));
    if !loaded_from_file {
        info!("No config file at {}, using defaults", Config::default_path());
    }
    info!("  Bind address: {}", config.bind_address());
    info!("  Body limit: {} MiB", config.server.body_limit_mb);
    info!("  File timeout: {:?}", config.processing.file_timeout_secs);

    let addr = config.bind_address();
    let state = AppState::new(config)?;
    info!("  Workers: {}", state.processor().pool().worker_count());

    let router = create_router(state);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Goodbye!");
    Ok(())
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining requests...");
}
