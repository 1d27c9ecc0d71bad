//! songbook-api - HTTP API server for the songbook catalog

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use songbook_api::config::AppConfig;
use songbook_api::telemetry::{init_tracing, LogSettings};
use songbook_api::{router, AppState, CatalogService};
use songbook_db::{Database, PoolConfig};
use songbook_enrichment::HttpSongDataClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(&LogSettings::from_env(config.env));

    // Connect to database
    info!(subsystem = "api", "Connecting to database...");
    let db = Database::connect_with_config(
        &config.database_url,
        PoolConfig::new().max_connections(config.db_max_connections),
    )
    .await?;
    songbook_db::log_pool_metrics(db.pool());

    if config.migrate_on_start {
        info!(subsystem = "api", "Running database migrations");
        db.migrate().await?;
    }

    let song_data = HttpSongDataClient::new(config.song_data.clone())?;
    let catalog = CatalogService::new(Arc::new(db.songs.clone()), Arc::new(song_data));
    let app = router(AppState::new(catalog));

    // Start server
    let addr: SocketAddr = config.bind_addr().parse()?;
    info!(subsystem = "api", %addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    info!(subsystem = "api", "Server stopped");
    Ok(())
}

/// Resolve on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!(subsystem = "api", "Shutdown signal received");
}
