//! # Vitrine Catalog API
//!
//! Stateless JSON endpoint over the shared catalog table. One path,
//! dispatched on the HTTP method.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog API                                     │
//! │                                                                         │
//! │  /products ──► CatalogCommand::parse ──► execute ──► CatalogRepository │
//! │      │               │                      │              │           │
//! │      │               ▼                      ▼              ▼           │
//! │      │        EndpointError          Envelope{success}   SQLite        │
//! │      │        (400 / 405)            data? message?      (vitrine-db)  │
//! │      ▼                                                                  │
//! │  OPTIONS → 200, empty body                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CATALOG_API_BIND` - interface (default: 0.0.0.0)
//! - `CATALOG_API_PORT` - HTTP port (default: 8081)
//! - `CATALOG_DATABASE_PATH` - SQLite file (default: catalog.db)
//! - `CATALOG_DB_MAX_CONNECTIONS` - pool size (default: 5)

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handler;
pub mod request;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vitrine_db::{Database, DbConfig};

pub use config::EndpointConfig;
pub use error::EndpointError;
pub use handler::create_router;

/// Opens the database and serves until Ctrl+C / SIGTERM.
pub async fn run(config: EndpointConfig) -> anyhow::Result<()> {
    info!(
        port = config.port,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.max_connections),
    )
    .await
    .context("failed to open catalog database")?;
    info!("Catalog database ready");

    let app = create_router(db.catalog());

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Catalog API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog_api=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install signal handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
