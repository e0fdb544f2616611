//! # Hero Store
//!
//! Banner mode and images, persisted as one `{mode, images}` document.
//! Same lock / save / commit / notify cycle as the product store.

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use vitrine_core::hero::HeroGallery;
use vitrine_core::{HeroConfig, HeroImage, HeroImagePatch, HeroMode, NewHeroImage};
use vitrine_db::{DbError, JsonSlot};

use super::StoreResult;

pub struct HeroStore {
    current: Mutex<HeroGallery>,
    slot: JsonSlot<HeroConfig>,
    tx: watch::Sender<HeroConfig>,
}

impl HeroStore {
    /// Loads the stored config, falling back to the default banner when
    /// nothing usable is stored.
    pub async fn open(slot: JsonSlot<HeroConfig>) -> StoreResult<Self> {
        let gallery = match slot.load().await {
            Ok(Some(config)) => {
                let gallery = HeroGallery::from_config(config.clone());
                if *gallery.config() != config {
                    warn!(images = config.images.len(), "Stored hero config out of bounds, using default");
                }
                gallery
            }
            Ok(None) => HeroGallery::default(),
            Err(DbError::Serialization(e)) => {
                warn!(key = %slot.key(), error = %e, "Stored hero config is unreadable, using default");
                HeroGallery::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(mode = ?gallery.mode(), images = gallery.images().len(), "Hero store ready");

        let (tx, _rx) = watch::channel(gallery.config().clone());
        Ok(HeroStore {
            current: Mutex::new(gallery),
            slot,
            tx,
        })
    }

    pub async fn config(&self) -> HeroConfig {
        self.current.lock().await.config().clone()
    }

    pub async fn set_mode(&self, mode: HeroMode) -> StoreResult<HeroConfig> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        next.set_mode(mode);

        self.commit(&mut current, next).await?;
        debug!(?mode, "Hero mode set");
        Ok(current.config().clone())
    }

    /// Appends an image under a fresh UUID.
    pub async fn add_image(&self, image: NewHeroImage) -> StoreResult<HeroImage> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        let added = next.add_image(image, Uuid::new_v4().to_string())?.clone();

        self.commit(&mut current, next).await?;
        debug!(id = %added.id, "Hero image added");
        Ok(added)
    }

    /// `Ok(None)` for an unknown id.
    pub async fn update_image(&self, id: &str, patch: HeroImagePatch) -> StoreResult<Option<HeroImage>> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        let Some(updated) = next.update_image(id, patch).cloned() else {
            return Ok(None);
        };

        self.commit(&mut current, next).await?;
        debug!(id = %id, "Hero image updated");
        Ok(Some(updated))
    }

    /// `Ok(false)` for an unknown id.
    pub async fn delete_image(&self, id: &str) -> StoreResult<bool> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        if !next.delete_image(id)? {
            return Ok(false);
        }

        self.commit(&mut current, next).await?;
        debug!(id = %id, "Hero image deleted");
        Ok(true)
    }

    /// Replaces the image sequence.
    pub async fn reorder(&self, images: Vec<HeroImage>) -> StoreResult<HeroConfig> {
        let mut current = self.current.lock().await;
        let mut next = current.clone();
        next.reorder(images)?;

        self.commit(&mut current, next).await?;
        Ok(current.config().clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<HeroConfig> {
        self.tx.subscribe()
    }

    async fn commit(&self, current: &mut HeroGallery, next: HeroGallery) -> StoreResult<()> {
        if let Err(e) = self.slot.save(next.config()).await {
            warn!(key = %self.slot.key(), error = %e, "Failed to persist hero config");
            return Err(e.into());
        }
        *current = next;
        self.tx.send_replace(current.config().clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StoreError;
    use std::sync::Arc;
    use vitrine_core::{CoreError, HERO_STORAGE_KEY};
    use vitrine_db::{KeyValueStore, MemoryStore};

    fn image(n: u32) -> NewHeroImage {
        NewHeroImage {
            url: format!("https://cdn.example.com/{n}.jpg"),
            alt: format!("Banner {n}"),
        }
    }

    async fn store_on(backend: Arc<dyn KeyValueStore>) -> HeroStore {
        HeroStore::open(JsonSlot::new(backend, HERO_STORAGE_KEY))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_starts_with_default_banner() {
        let store = store_on(Arc::new(MemoryStore::new())).await;
        assert_eq!(store.config().await, HeroConfig::default());
    }

    #[tokio::test]
    async fn test_fourth_image_is_rejected() {
        let store = store_on(Arc::new(MemoryStore::new())).await;
        store.add_image(image(2)).await.unwrap();
        store.add_image(image(3)).await.unwrap();

        let err = store.add_image(image(4)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::HeroCapacityExceeded { max: 3 })
        ));
        assert_eq!(store.config().await.images.len(), 3);
    }

    #[tokio::test]
    async fn test_last_image_cannot_be_deleted() {
        let store = store_on(Arc::new(MemoryStore::new())).await;
        let err = store.delete_image("1").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(ref e) if e.is_capacity()));
        assert!(!store.delete_image("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_mode_and_images_persist_together() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = store_on(backend.clone()).await;
        let added = store.add_image(image(2)).await.unwrap();
        store.set_mode(HeroMode::Carousel).await.unwrap();

        let reopened = store_on(backend).await;
        let config = reopened.config().await;
        assert_eq!(config.mode, HeroMode::Carousel);
        assert_eq!(config.images.last().unwrap().id, added.id);
    }

    #[tokio::test]
    async fn test_reorder_and_update() {
        let store = store_on(Arc::new(MemoryStore::new())).await;
        let added = store.add_image(image(2)).await.unwrap();

        let mut images = store.config().await.images;
        images.reverse();
        let config = store.reorder(images).await.unwrap();
        assert_eq!(config.images[0].id, added.id);

        let patch = HeroImagePatch {
            alt: Some("Coleção inverno".to_string()),
            url: None,
        };
        let updated = store.update_image(&added.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.alt, "Coleção inverno");
        assert!(store
            .update_image("ghost", HeroImagePatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_out_of_bounds_storage_uses_default() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .put(HERO_STORAGE_KEY, r#"{"mode":"carousel","images":[]}"#.to_string())
            .await
            .unwrap();

        let store = store_on(backend).await;
        assert_eq!(store.config().await, HeroConfig::default());
    }

    #[tokio::test]
    async fn test_subscribers_observe_mode_change() {
        let store = store_on(Arc::new(MemoryStore::new())).await;
        let mut rx = store.subscribe();

        store.set_mode(HeroMode::Carousel).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().mode, HeroMode::Carousel);
    }
}
