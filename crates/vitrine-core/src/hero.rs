//! # Hero Gallery
//!
//! Banner mode and images, holding the `MIN_HERO_IMAGES..=MAX_HERO_IMAGES`
//! bound across every mutation. A rejected mutation leaves the gallery
//! untouched.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{HeroConfig, HeroImage, HeroImagePatch, HeroMode, NewHeroImage};
use crate::validation::validate_hero_image;
use crate::{MAX_HERO_IMAGES, MIN_HERO_IMAGES};

/// Wraps a [`HeroConfig`] and owns its invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroGallery {
    config: HeroConfig,
}

impl HeroGallery {
    /// Adopts a loaded config. A config outside the image bounds, or with
    /// blank or repeated image ids, is replaced by the default one.
    pub fn from_config(config: HeroConfig) -> Self {
        if is_within_bounds(config.images.len()) && check_image_ids(&config.images).is_ok() {
            HeroGallery { config }
        } else {
            HeroGallery::default()
        }
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn into_config(self) -> HeroConfig {
        self.config
    }

    pub fn mode(&self) -> HeroMode {
        self.config.mode
    }

    pub fn images(&self) -> &[HeroImage] {
        &self.config.images
    }

    pub fn set_mode(&mut self, mode: HeroMode) {
        self.config.mode = mode;
    }

    /// Appends an image with the caller-generated `id`.
    pub fn add_image(&mut self, image: NewHeroImage, id: String) -> CoreResult<&HeroImage> {
        validate_hero_image(&image)?;

        if self.config.images.len() >= MAX_HERO_IMAGES {
            return Err(CoreError::HeroCapacityExceeded {
                max: MAX_HERO_IMAGES,
            });
        }

        self.config.images.push(HeroImage {
            id,
            url: image.url,
            alt: image.alt,
        });
        let last = self.config.images.len() - 1;
        Ok(&self.config.images[last])
    }

    /// Merges `patch` into image `id`. Unknown ids return `None`.
    ///
    /// Blank values are ignored so a patch can never strip the url or alt.
    pub fn update_image(&mut self, id: &str, patch: HeroImagePatch) -> Option<&HeroImage> {
        let image = self.config.images.iter_mut().find(|img| img.id == id)?;

        if let Some(url) = patch.url.filter(|u| !u.trim().is_empty()) {
            image.url = url;
        }
        if let Some(alt) = patch.alt.filter(|a| !a.trim().is_empty()) {
            image.alt = alt;
        }
        Some(image)
    }

    /// Removes image `id`. Refuses to drop the last image.
    ///
    /// Returns `Ok(false)` for an unknown id.
    pub fn delete_image(&mut self, id: &str) -> CoreResult<bool> {
        if !self.config.images.iter().any(|img| img.id == id) {
            return Ok(false);
        }
        if self.config.images.len() <= MIN_HERO_IMAGES {
            return Err(CoreError::HeroMinimumImages {
                min: MIN_HERO_IMAGES,
            });
        }

        self.config.images.retain(|img| img.id != id);
        Ok(true)
    }

    /// Replaces the image sequence wholesale. Ids must be present and unique.
    pub fn reorder(&mut self, images: Vec<HeroImage>) -> CoreResult<()> {
        if images.len() > MAX_HERO_IMAGES {
            return Err(CoreError::HeroCapacityExceeded {
                max: MAX_HERO_IMAGES,
            });
        }
        if images.len() < MIN_HERO_IMAGES {
            return Err(CoreError::HeroMinimumImages {
                min: MIN_HERO_IMAGES,
            });
        }
        check_image_ids(&images)?;
        for image in &images {
            validate_hero_image(&NewHeroImage {
                url: image.url.clone(),
                alt: image.alt.clone(),
            })?;
        }

        self.config.images = images;
        Ok(())
    }
}

/// Every id non-blank and distinct.
fn check_image_ids(images: &[HeroImage]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(images.len());
    for image in images {
        if image.id.trim().is_empty() {
            return Err(ValidationError::required("id"));
        }
        if !seen.insert(image.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: image.id.clone(),
            });
        }
    }
    Ok(())
}

/// Whether `count` images is a legal banner size.
pub fn is_within_bounds(count: usize) -> bool {
    (MIN_HERO_IMAGES..=MAX_HERO_IMAGES).contains(&count)
}
