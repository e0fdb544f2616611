//! # Product Store
//!
//! The product collection held in memory, persisted through a [`JsonSlot`]
//! and fanned out to subscribers.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lock ──► clone ──► apply (vitrine-core) ──► save ──► commit ──► notify  │
//! │                          │                    │                         │
//! │                          ▼                    ▼                         │
//! │                    ValidationError      PersistenceError                │
//! │                    (nothing changed)    (nothing changed)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mutex is held across the save, so two mutations never interleave.

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use vitrine_core::products::{demo_products, ProductCollection};
use vitrine_core::{Product, ProductDraft, ProductPatch};
use vitrine_db::{DbError, JsonSlot};

use super::StoreResult;

pub struct ProductStore {
    current: Mutex<ProductCollection>,
    slot: JsonSlot<ProductCollection>,
    tx: watch::Sender<ProductCollection>,
}

impl ProductStore {
    /// Loads the stored collection.
    ///
    /// Nothing stored, or a value that no longer parses, falls back to an
    /// empty collection (or the demo catalog when `seed_demo_catalog` is set).
    /// A seeded fallback is persisted right away.
    pub async fn open(slot: JsonSlot<ProductCollection>, seed_demo_catalog: bool) -> StoreResult<Self> {
        let loaded = match slot.load().await {
            Ok(Some(stored)) => Some(ProductCollection::from_products(stored.into_vec())),
            Ok(None) => None,
            Err(DbError::Serialization(e)) => {
                warn!(key = %slot.key(), error = %e, "Stored products are unreadable, starting over");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let collection = match loaded {
            Some(collection) => collection,
            None if seed_demo_catalog => {
                let seeded = ProductCollection::from_products(demo_products(Utc::now()));
                slot.save(&seeded).await?;
                info!(count = seeded.len(), "Seeded demo catalog");
                seeded
            }
            None => ProductCollection::default(),
        };

        info!(count = collection.len(), "Product store ready");

        let (tx, _rx) = watch::channel(collection.clone());
        Ok(ProductStore {
            current: Mutex::new(collection),
            slot,
            tx,
        })
    }

    /// Adds a product. The id is the draft's, or a fresh UUID.
    pub async fn add(&self, draft: ProductDraft) -> StoreResult<Product> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();

        let product = next
            .insert(draft, Uuid::new_v4().to_string(), Utc::now())?
            .clone();

        self.commit(&mut current, next).await?;
        debug!(id = %product.id, "Product added");
        Ok(product)
    }

    /// Merges `patch` into product `id`. `Ok(None)` for an unknown id.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();

        let Some(product) = next.apply_patch(id, patch, Utc::now())?.cloned() else {
            debug!(id = %id, "Update ignored, unknown product");
            return Ok(None);
        };

        self.commit(&mut current, next).await?;
        debug!(id = %id, "Product updated");
        Ok(Some(product))
    }

    /// Removes product `id`. `Ok(false)` for an unknown id.
    pub async fn remove(&self, id: &str) -> StoreResult<bool> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();

        if !next.remove(id) {
            return Ok(false);
        }

        self.commit(&mut current, next).await?;
        debug!(id = %id, "Product removed");
        Ok(true)
    }

    /// Flips availability of product `id`. `Ok(None)` for an unknown id.
    pub async fn toggle_availability(&self, id: &str) -> StoreResult<Option<Product>> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();

        let Some(product) = next.toggle_availability(id, Utc::now()).cloned() else {
            return Ok(None);
        };

        self.commit(&mut current, next).await?;
        debug!(id = %id, available = product.available, "Availability toggled");
        Ok(Some(product))
    }

    pub async fn get(&self, id: &str) -> Option<Product> {
        self.current.lock().await.get(id).cloned()
    }

    /// Snapshot of the whole collection in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.current.lock().await.as_slice().to_vec()
    }

    /// Receives the full collection after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<ProductCollection> {
        self.tx.subscribe()
    }

    /// Saves `next`, then makes it current. A failed save leaves memory as it was.
    async fn commit(&self, current: &mut ProductCollection, next: ProductCollection) -> StoreResult<()> {
        if let Err(e) = self.slot.save(&next).await {
            warn!(key = %self.slot.key(), error = %e, "Failed to persist products");
            return Err(e.into());
        }
        *current = next;
        self.tx.send_replace(current.clone());
        Ok(())
    }
}
