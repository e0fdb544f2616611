//! # Storefront Library
//!
//! HTTP surface of the Vitrine storefront: the public catalog and hero
//! banner, plus the password-gated admin API that manages them.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & serve)
//! ├── config.rs       ◄─── storefront.toml + VITRINE_* env
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState, StoreError, backend selection
//! │   ├── products.rs ◄─── ProductStore
//! │   ├── hero.rs     ◄─── HeroStore
//! │   └── sessions.rs ◄─── AdminSessions (bearer tokens)
//! ├── routes/
//! │   ├── mod.rs      ◄─── Router
//! │   ├── catalog.rs  ◄─── Public routes
//! │   ├── admin.rs    ◄─── Login + product management
//! │   └── hero.rs     ◄─── Banner management
//! ├── auth.rs         ◄─── Bearer-token middleware
//! ├── extract.rs      ◄─── Json/Query with API error rejections
//! └── error.rs        ◄─── ApiError {code, message}
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use config::StorefrontConfig;
pub use routes::create_router;
pub use state::AppState;

/// Runs the storefront server until Ctrl+C / SIGTERM.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Open storage backend (file | sqlite | memory)                       │
/// │  2. Load products (seed demo catalog if asked) and hero config          │
/// │  3. Build router (CORS open, request tracing)                           │
/// │  4. Bind and serve with graceful shutdown                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config: StorefrontConfig) -> anyhow::Result<()> {
    info!(backend = %config.storage.backend, "Starting Vitrine storefront");

    let state = AppState::open(&config)
        .await
        .context("failed to open storefront state")?;
    let app = create_router(Arc::new(state));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for this crate only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,tower_http=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
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
                error!(error = %e, "Failed to install SIGTERM handler");
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
