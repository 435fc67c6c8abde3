//! SearchAPI: access-controlled search over Elasticsearch
//!
//! This is the main entry point for the application.

use anyhow::Result;
use searchapi::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting SearchAPI v{}", searchapi::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!(
        "Elasticsearch at {} with index prefix {}",
        settings.elasticsearch.url, settings.elasticsearch.index_prefix
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let app = create_router(AppState::new(settings, client));

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
