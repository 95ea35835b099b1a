//! Enviro Store - Binary Entry Point
//!
//! This is the main entry point for the enviro-server binary.

use std::sync::Arc;

use tracing::{info, warn};

use enviro_store::api::http::create_router;
use enviro_store::types::AppResult;
use enviro_store::{SensorStore, StoreConfig};

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = StoreConfig::from_env();
    info!(
        version = enviro_store::VERSION,
        fast = config.fast.is_some(),
        archive = config.archive.is_some(),
        max_records = config.max_records,
        "starting enviro-store"
    );

    let store = Arc::new(SensorStore::from_config(&config)?);
    let app = create_router(store);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => warn!(error = %err, "failed to listen for shutdown signal"),
    }
}
