//! # vitrine-core: Pure Domain Logic for the Vitrine storefront
//!
//! This crate holds every rule of the fashion-rental storefront as pure
//! functions over plain data. Nothing in here reads the clock, touches disk
//! or talks to the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vitrine Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser storefront (external)                   │   │
//! │  │     Hero banner ──► Product grid ──► Admin dashboard            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (axum)                          │   │
//! │  │     ProductStore, HeroStore, AdminSessions                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrine-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐ │   │
//! │  │  │  types   │ │ products │ │   hero   │ │ catalog │ │session │ │   │
//! │  │  │ Product  │ │Collection│ │ Gallery  │ │ filter  │ │ guard  │ │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └─────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vitrine-db (storage layer)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, HeroConfig, CatalogEntry, ...)
//! - [`products`] - The product collection and its mutations
//! - [`hero`] - Hero banner configuration with its 1..=3 image bound
//! - [`catalog`] - Filtering, incremental reveal and dashboard stats
//! - [`session`] - Shared-password admin gate
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use vitrine_core::products::ProductCollection;
//! use vitrine_core::types::{Category, ProductDraft};
//!
//! let mut collection = ProductCollection::default();
//! let draft = ProductDraft {
//!     name: "Vestido Longo Azul".to_string(),
//!     category: Some(Category::Festa),
//!     price: "R$ 150/dia".to_string(),
//!     ..ProductDraft::default()
//! };
//!
//! let product = collection.insert(draft, "p1".to_string(), Utc::now()).unwrap();
//! assert_eq!(product.created_at, product.updated_at);
//! assert_eq!(collection.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod hero;
pub mod products;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the serialized product collection.
pub const PRODUCTS_STORAGE_KEY: &str = "fashion_rental_products";

/// Storage key holding the serialized `{mode, images}` hero pair.
pub const HERO_STORAGE_KEY: &str = "fashion_rental_hero_config";

/// Maximum number of hero banner images.
pub const MAX_HERO_IMAGES: usize = 3;

/// Minimum number of hero banner images. The banner is never empty.
pub const MIN_HERO_IMAGES: usize = 1;

/// Number of products the public catalog shows before "reveal all".
pub const CATALOG_PAGE_SIZE: usize = 6;

/// Maximum accepted length of a free-text search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
