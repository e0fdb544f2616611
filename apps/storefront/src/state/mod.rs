//! # State Module
//!
//! Application state shared by every handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::with_state(Arc<AppState>)                                     │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ ProductStore │  │  HeroStore   │  │  AdminSessions   │              │
//! │  │              │  │              │  │                  │              │
//! │  │ Mutex<       │  │ Mutex<       │  │ RwLock<HashMap<  │              │
//! │  │  Collection> │  │  Gallery>    │  │  token, session>>│              │
//! │  │ watch::Sender│  │ watch::Sender│  │ AdminGuard       │              │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────────┘              │
//! │         │                 │                                             │
//! │         ▼                 ▼                                             │
//! │  JsonSlot("fashion_rental_products")  JsonSlot("..._hero_config")      │
//! │         └────────┬────────┘                                             │
//! │                  ▼                                                      │
//! │        Arc<dyn KeyValueStore> (file | sqlite | memory)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two stores are independent: a failure saving one never touches the
//! other.

mod hero;
mod products;
mod sessions;

pub use hero::HeroStore;
pub use products::ProductStore;
pub use sessions::AdminSessions;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use vitrine_core::session::AdminGuard;
use vitrine_core::{CoreError, HERO_STORAGE_KEY, PRODUCTS_STORAGE_KEY};
use vitrine_db::{Database, DbConfig, DbError, JsonFileStore, JsonSlot, KeyValueStore, MemoryStore};

use crate::config::{StorageBackend, StorefrontConfig};

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain rule rejected the mutation. Nothing changed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend refused the save. Nothing changed.
    #[error(transparent)]
    Db(#[from] DbError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the handlers need.
pub struct AppState {
    pub products: ProductStore,
    pub hero: HeroStore,
    pub sessions: AdminSessions,
}

impl AppState {
    /// Opens the configured backend and both stores.
    pub async fn open(config: &StorefrontConfig) -> StoreResult<Self> {
        let backend: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => {
                let dir = config.data_dir();
                info!(dir = %dir.display(), "Using JSON file storage");
                Arc::new(JsonFileStore::open(dir).await?)
            }
            StorageBackend::Sqlite => {
                let path = config.database_path();
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(DbError::from)?;
                }
                info!(path = %path.display(), "Using SQLite storage");
                let db = Database::new(DbConfig::new(path)).await?;
                Arc::new(db.kv_store())
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; nothing survives a restart");
                Arc::new(MemoryStore::new())
            }
        };

        Self::with_backend(backend, config).await
    }

    /// Builds the state over an already opened backend.
    pub async fn with_backend(
        backend: Arc<dyn KeyValueStore>,
        config: &StorefrontConfig,
    ) -> StoreResult<Self> {
        let products = ProductStore::open(
            JsonSlot::new(backend.clone(), PRODUCTS_STORAGE_KEY),
            config.catalog.seed_demo_catalog,
        )
        .await?;
        let hero = HeroStore::open(JsonSlot::new(backend, HERO_STORAGE_KEY)).await?;
        let sessions = AdminSessions::new(AdminGuard::new(
            config.admin.password.clone(),
            config.session_ttl(),
        ));

        Ok(AppState {
            products,
            hero,
            sessions,
        })
    }
}
