//! heartlog-server - heartlog web server
//!
//! Serves the HTML pages and the JSON API over the flat-file store.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use heartlog_core::{Analyzer, Config, Store};

mod html;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("heartlog_server=info".parse()?)
                .add_directive("heartlog_core=info".parse()?),
        )
        .init();

    info!("heartlog-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    info!("Config loaded from {:?}", Config::config_path());

    let store = Store::open(&config.paths.data_dir)?;
    info!("Data directory: {}", store.data_dir().display());

    if !config.has_api_key() {
        tracing::warn!("No API key configured; analysis will return placeholders");
    }
    let analyzer = Analyzer::from_config(&config.analyzer)?;

    let bind = config.server.bind.clone();
    let state = Arc::new(AppState::new(config, store, analyzer));
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
