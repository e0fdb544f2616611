//! # Repository Module
//!
//! SQL access for the remote catalog table.
//!
//! ```text
//! catalog-api handler
//!      │  db.catalog().insert(&entry)
//!      ▼
//! CatalogRepository
//! ├── list_all()
//! ├── insert(entry)
//! ├── update(entry)  → rows affected
//! └── delete(id)     → rows affected
//!      │
//!      ▼
//! catalog_entries (SQLite)
//! ```

pub mod catalog;
