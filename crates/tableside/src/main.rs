//! # Tableside server
//!
//! Loads configuration, starts the actors and serves HTTP and WebSocket traffic until
//! Ctrl-C.
//!
//! ```bash
//! TABLESIDE_SERVER__PORT=9000 RUST_LOG=debug cargo run -p tableside
//! ```

use anyhow::Context;
use tableside::config::load_config;
use tableside::lifecycle::{setup_tracing, TablesideSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    setup_tracing(&config.logging.filter);

    let system = TablesideSystem::start(&config)
        .await
        .context("Failed to start system")?;
    let app = system.router(&config.server.allowed_origins);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
