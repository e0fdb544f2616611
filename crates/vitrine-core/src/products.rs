//! # Product Collection
//!
//! The ordered product list and the rules for changing it.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin action           Method                   Effect                 │
//! │  ────────────           ──────                   ──────                 │
//! │  Save new product ────► insert(draft, id, now) ► push, both stamps=now  │
//! │  Save edits ──────────► apply_patch(id, ..) ───► merge, updated_at=now  │
//! │  Eye icon ────────────► toggle_availability() ─► flip, updated_at=now   │
//! │  Trash icon ──────────► remove(id) ────────────► retain != id           │
//! │  Open form ───────────► get(id) ───────────────► read only              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown identifiers are not errors: `apply_patch` and
//! `toggle_availability` return `None`, `remove` returns `false`, and the
//! collection is left as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::types::{Category, Product, ProductDraft, ProductPatch, Size};
use crate::validation::{validate_product_draft, validate_product_patch};

/// Ordered product collection. Insertion order is preserved.
///
/// Serializes transparently as a JSON array so the persisted value is the
/// plain list of products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCollection {
    items: Vec<Product>,
}

impl ProductCollection {
    /// Wraps an existing list. Later duplicates of an id are dropped so the
    /// uniqueness invariant holds for anything loaded from storage.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut items: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if !items.iter().any(|p| p.id == product.id) {
                items.push(product);
            }
        }
        ProductCollection { items }
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Product> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    /// Returns the product with `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Appends a new product built from `draft`.
    ///
    /// ## Rules
    /// - name, category and price are required
    /// - `draft.id` wins over `generated_id` when present
    /// - the resulting id must not already exist
    /// - `created_at` and `updated_at` are both `now`
    pub fn insert(
        &mut self,
        draft: ProductDraft,
        generated_id: String,
        now: DateTime<Utc>,
    ) -> CoreResult<&Product> {
        let category = validate_product_draft(&draft)?;

        let id = draft
            .id
            .map(|id| id.trim().to_string())
            .unwrap_or(generated_id);

        if self.contains(&id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: id,
            }
            .into());
        }

        let product = Product {
            id,
            name: draft.name.trim().to_string(),
            category,
            price: draft.price.trim().to_string(),
            size: draft.size,
            image: draft.image,
            additional_images: draft.additional_images.filter(|images| !images.is_empty()),
            description: draft.description,
            available: draft.available,
            measurements: draft.measurements.and_then(|m| m.normalized()),
            created_at: now,
            updated_at: now,
        };

        self.items.push(product);
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Merges the supplied fields of `patch` into product `id`.
    ///
    /// Validation runs before the lookup, so an invalid patch is rejected
    /// even for an unknown id.
    pub fn apply_patch(
        &mut self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> CoreResult<Option<&Product>> {
        validate_product_patch(&patch)?;

        let Some(product) = self.items.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(price) = patch.price {
            product.price = price.trim().to_string();
        }
        if let Some(size) = patch.size {
            product.size = size;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }
        if let Some(images) = patch.additional_images {
            product.additional_images = images;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(available) = patch.available {
            product.available = available;
        }
        if let Some(measurements) = patch.measurements {
            product.measurements = measurements.and_then(|m| m.normalized());
        }

        product.updated_at = refreshed(product.created_at, now);
        Ok(Some(product))
    }

    /// Flips `available` on product `id`.
    pub fn toggle_availability(&mut self, id: &str, now: DateTime<Utc>) -> Option<&Product> {
        let product = self.items.iter_mut().find(|p| p.id == id)?;
        product.available = !product.available;
        product.updated_at = refreshed(product.created_at, now);
        Some(product)
    }

    /// Removes product `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        self.items.len() != before
    }
}

/// `updated_at` never goes below `created_at`, even with a skewed clock.
fn refreshed(created_at: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(created_at)
}

// =============================================================================
// Demo Catalog
// =============================================================================

/// Products shown on a fresh install so the storefront isn't empty.
pub fn demo_products(now: DateTime<Utc>) -> Vec<Product> {
    let product = |id: &str, name: &str, category, price: &str, image: &str, description: &str, size, available| Product {
        id: id.to_string(),
        name: name.to_string(),
        category,
        price: price.to_string(),
        size: Some(size),
        image: image.to_string(),
        additional_images: None,
        description: description.to_string(),
        available,
        measurements: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        product(
            "1",
            "Vestido Elegante Preto",
            Category::Vestidos,
            "R$ 120/dia",
            "/assets/dress-1.jpg",
            "Vestido elegante para ocasiões especiais",
            Size::M,
            true,
        ),
        product(
            "2",
            "Terno Executivo",
            Category::Ternos,
            "R$ 200/dia",
            "/assets/suit-1.jpg",
            "Terno executivo para reuniões importantes",
            Size::G,
            true,
        ),
        product(
            "3",
            "Look Casual Chic",
            Category::Casual,
            "R$ 80/dia",
            "/assets/casual-1.jpg",
            "Look casual para o dia a dia",
            Size::P,
            false,
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::Measurements;
    use chrono::Duration;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: Some(Category::Festa),
            price: "R$ 90/dia".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
            description: "Vestido longo de festa".to_string(),
            ..ProductDraft::default()
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_insert_then_get_returns_supplied_fields() {
        let mut collection = ProductCollection::default();
        let mut input = draft("Vestido Azul");
        input.size = Some(Size::GG);
        input.measurements = Some(Measurements {
            bust: Some("92cm".to_string()),
            ..Measurements::default()
        });

        collection.insert(input, "gen-1".to_string(), t0()).unwrap();

        let product = collection.get("gen-1").unwrap();
        assert_eq!(product.name, "Vestido Azul");
        assert_eq!(product.category, Category::Festa);
        assert_eq!(product.price, "R$ 90/dia");
        assert_eq!(product.size, Some(Size::GG));
        assert!(product.available);
        assert_eq!(product.measurements.as_ref().unwrap().bust.as_deref(), Some("92cm"));
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_insert_prefers_caller_id_and_rejects_duplicates() {
        let mut collection = ProductCollection::default();
        let mut input = draft("A");
        input.id = Some("p1".to_string());
        collection.insert(input.clone(), "gen".to_string(), t0()).unwrap();
        assert!(collection.contains("p1"));

        let err = collection.insert(input, "gen-2".to_string(), t0()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_insert_invalid_does_not_mutate() {
        let mut collection = ProductCollection::default();
        let mut input = draft("A");
        input.price = String::new();

        assert!(collection.insert(input, "gen".to_string(), t0()).is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut collection = ProductCollection::default();
        collection.insert(draft("A"), "a".to_string(), t0()).unwrap();
        collection.insert(draft("B"), "b".to_string(), t0()).unwrap();

        let ids: Vec<&str> = collection.as_slice().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_patch_changes_only_supplied_field() {
        let mut collection = ProductCollection::default();
        collection.insert(draft("A"), "a".to_string(), t0()).unwrap();
        let before = collection.get("a").unwrap().clone();

        let later = t0() + Duration::minutes(5);
        let patch = ProductPatch {
            description: Some("Nova descrição".to_string()),
            ..ProductPatch::default()
        };
        collection.apply_patch("a", patch, later).unwrap();

        let after = collection.get("a").unwrap();
        assert_eq!(after.description, "Nova descrição");
        assert_eq!(after.updated_at, later);

        let mut expected = before;
        expected.description = "Nova descrição".to_string();
        expected.updated_at = later;
        assert_eq!(*after, expected);
    }

    #[test]
    fn test_patch_clears_nullable_fields() {
        let mut collection = ProductCollection::default();
        let mut input = draft("A");
        input.size = Some(Size::M);
        collection.insert(input, "a".to_string(), t0()).unwrap();

        let patch = ProductPatch {
            size: Some(None),
            ..ProductPatch::default()
        };
        collection.apply_patch("a", patch, t0()).unwrap();
        assert_eq!(collection.get("a").unwrap().size, None);
    }

    #[test]
    fn test_patch_unknown_id_is_noop() {
        let mut collection = ProductCollection::default();
        collection.insert(draft("A"), "a".to_string(), t0()).unwrap();
        let snapshot = collection.clone();

        let patch = ProductPatch {
            name: Some("B".to_string()),
            ..ProductPatch::default()
        };
        assert!(collection.apply_patch("missing", patch, t0()).unwrap().is_none());
        assert_eq!(collection, snapshot);
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut collection = ProductCollection::default();
        collection.insert(draft("A"), "a".to_string(), t0()).unwrap();

        let first = t0() + Duration::seconds(1);
        let second = t0() + Duration::seconds(2);

        assert!(!collection.toggle_availability("a", first).unwrap().available);
        let product = collection.toggle_availability("a", second).unwrap();
        assert!(product.available);
        assert_eq!(product.updated_at, second);

        assert!(collection.toggle_availability("missing", second).is_none());
    }

    #[test]
    fn test_updated_at_never_before_created_at() {
        let mut collection = ProductCollection::default();
        collection.insert(draft("A"), "a".to_string(), t0()).unwrap();

        let skewed = t0() - Duration::hours(1);
        let product = collection.toggle_availability("a", skewed).unwrap();
        assert!(product.updated_at >= product.created_at);
    }

    #[test]
    fn test_remove() {
        let mut collection = ProductCollection::default();
        collection.insert(draft("A"), "a".to_string(), t0()).unwrap();

        assert!(!collection.remove("missing"));
        assert!(collection.remove("a"));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_from_products_drops_duplicate_ids() {
        let mut products = demo_products(t0());
        products.push(products[0].clone());

        let collection = ProductCollection::from_products(products);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let collection = ProductCollection::from_products(demo_products(t0()));
        let value = serde_json::to_value(&collection).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["createdAt"], serde_json::json!("2025-03-01T12:00:00Z"));
    }
}
