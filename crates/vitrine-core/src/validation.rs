//! # Validation Module
//!
//! Input validation for every write path.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  └── Required-field hints, immediate feedback                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP boundary (serde)                                        │
//! │  └── Shape and enum checks while deserializing                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Required, non-blank fields before any state is touched            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite                                                       │
//! │  └── PRIMARY KEY uniqueness on the catalog table                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{CatalogEntry, Category, NewHeroImage, ProductDraft, ProductPatch};
use crate::MAX_SEARCH_QUERY_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Fails with `Required` when `value` is empty after trimming.
///
/// ## Example
/// ```rust
/// use vitrine_core::validation::require_non_blank;
///
/// assert!(require_non_blank("name", "Vestido").is_ok());
/// assert!(require_non_blank("name", "   ").is_err());
/// ```
pub fn require_non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a free-text search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates the add-product form.
///
/// ## Rules
/// - `name` and `price` must be non-blank
/// - `category` must be selected
/// - a caller-supplied `id` must be non-blank
///
/// ## Returns
/// The selected category, so callers don't have to unwrap it again.
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<Category> {
    require_non_blank("name", &draft.name)?;
    let category = draft.category.ok_or_else(|| ValidationError::required("category"))?;
    require_non_blank("price", &draft.price)?;

    if let Some(id) = &draft.id {
        require_non_blank("id", id)?;
    }

    Ok(category)
}

/// Validates a partial update. Only supplied fields are checked; a patch
/// may not blank out a required field.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        require_non_blank("name", name)?;
    }
    if let Some(price) = &patch.price {
        require_non_blank("price", price)?;
    }
    Ok(())
}

// =============================================================================
// Hero Validators
// =============================================================================

/// Validates a new banner image: both URL and alt text are required.
pub fn validate_hero_image(image: &NewHeroImage) -> ValidationResult<()> {
    require_non_blank("url", &image.url)?;
    require_non_blank("alt", &image.alt)?;
    Ok(())
}

// =============================================================================
// Catalog Entry Validators
// =============================================================================

/// Validates a remote catalog row: all five fields are required.
pub fn validate_catalog_entry(entry: &CatalogEntry) -> ValidationResult<()> {
    require_non_blank("id", &entry.id)?;
    require_non_blank("title", &entry.title)?;
    require_non_blank("description", &entry.description)?;
    require_non_blank("image", &entry.image)?;
    require_non_blank("whatsappMessage", &entry.whatsapp_message)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Terno Executivo".to_string(),
            category: Some(Category::Ternos),
            price: "R$ 200/dia".to_string(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_validate_product_draft() {
        assert_eq!(validate_product_draft(&draft()).unwrap(), Category::Ternos);

        let missing_name = ProductDraft {
            name: " ".to_string(),
            ..draft()
        };
        assert!(matches!(
            validate_product_draft(&missing_name),
            Err(ValidationError::Required { field }) if field == "name"
        ));

        let missing_category = ProductDraft {
            category: None,
            ..draft()
        };
        assert!(matches!(
            validate_product_draft(&missing_category),
            Err(ValidationError::Required { field }) if field == "category"
        ));

        let missing_price = ProductDraft {
            price: String::new(),
            ..draft()
        };
        assert!(validate_product_draft(&missing_price).is_err());

        let blank_id = ProductDraft {
            id: Some("".to_string()),
            ..draft()
        };
        assert!(validate_product_draft(&blank_id).is_err());
    }

    #[test]
    fn test_validate_product_patch() {
        assert!(validate_product_patch(&ProductPatch::default()).is_ok());

        let patch = ProductPatch {
            price: Some("  ".to_string()),
            ..ProductPatch::default()
        };
        assert!(validate_product_patch(&patch).is_err());

        let patch = ProductPatch {
            description: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(validate_product_patch(&patch).is_ok());
    }

    #[test]
    fn test_validate_hero_image() {
        let ok = NewHeroImage {
            url: "https://cdn.example.com/hero.jpg".to_string(),
            alt: "Coleção de verão".to_string(),
        };
        assert!(validate_hero_image(&ok).is_ok());

        let no_alt = NewHeroImage {
            alt: String::new(),
            ..ok
        };
        assert!(validate_hero_image(&no_alt).is_err());
    }

    #[test]
    fn test_validate_catalog_entry() {
        let entry = CatalogEntry {
            id: "p1".to_string(),
            title: "Vestido X".to_string(),
            description: "d".to_string(),
            image: "http://x/i.jpg".to_string(),
            whatsapp_message: "m".to_string(),
        };
        assert!(validate_catalog_entry(&entry).is_ok());

        let no_message = CatalogEntry {
            whatsapp_message: String::new(),
            ..entry
        };
        assert!(matches!(
            validate_catalog_entry(&no_message),
            Err(ValidationError::Required { field }) if field == "whatsappMessage"
        ));
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  vestido ").unwrap(), "vestido");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }
}
