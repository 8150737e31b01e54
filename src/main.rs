//! Storefront binary.
//!
//! ```bash
//! cargo run
//! RUST_LOG=debug STOREFRONT_DATA_DIR=./data cargo run
//! ```
//!
//! See [`storefront::config`] for the environment variables it reads.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use storefront::api::{create_router, AppState};
use storefront::app_system::{setup_tracing, StoreSystem};
use storefront::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing, so RUST_LOG from .env takes effect
    let dotenv = dotenvy::dotenv();
    setup_tracing();
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded .env");
    }

    let settings = Settings::from_env()?;
    info!(?settings, "Starting storefront");

    let system = StoreSystem::start(&settings.store)
        .await
        .context("failed to open collections")?;

    let app = create_router(AppState::new(
        system.order_client.clone(),
        system.product_client.clone(),
    ));

    let addr = settings.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Application completed successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
