//! Unibridge - Study-Abroad Catalog Server
//!
//! Serves the public university/course catalog, events calendar and
//! submission forms, plus the back-office API behind the admin dashboard.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unibridge::config::{self, LogFormat};
use unibridge::{api, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = config::init();

    // Initialize tracing
    let (json, pretty) = match config.logging.format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(tracing_subscriber::fmt::layer())),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unibridge=debug,tower_http=debug".into()),
        )
        .with(json)
        .with(pretty)
        .init();

    tracing::info!(
        "Starting Unibridge server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Initialize application state
    let handle = metrics::init_metrics();
    let state = AppState::new(handle).await?;
    tracing::info!(database = %config.database.path, "Application state initialized");

    let app = api::app(state, &config.server.cors_allowed_origins);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid HOST/PORT")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
