//! # vitrine-db: Storage Layer for Vitrine
//!
//! Two unrelated persistence paths share this crate:
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Data Flow                                │
//! │                                                                         │
//! │  apps/storefront                         apps/catalog-api               │
//! │  ProductStore / HeroStore                GET/POST/PUT/DELETE /products  │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vitrine-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  KeyValueStore│    │  Repositories │    │   Database   │  │   │
//! │  │   │   (kv.rs)     │    │ (catalog.rs)  │    │  (pool.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ JsonFileStore │    │ CatalogRepo   │───►│ SqlitePool   │  │   │
//! │  │   │ SqliteKvStore │───────────────────────►│ schema.rs    │  │   │
//! │  │   │ MemoryStore   │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Table bootstrap
//! - [`kv`] - Key-value backends and the typed [`JsonSlot`]
//! - [`repository`] - The remote catalog table
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/vitrine.db")).await?;
//! let entries = db.catalog().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use kv::{JsonFileStore, JsonSlot, KeyValueStore, MemoryStore, SqliteKvStore};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
