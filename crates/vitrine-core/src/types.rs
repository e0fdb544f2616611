//! # Domain Types
//!
//! Core domain types used throughout Vitrine.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   HeroConfig    │   │  CatalogEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  mode           │   │  id             │       │
//! │  │  name, price    │   │  images (1..=3) │   │  title          │       │
//! │  │  category, size │   │    id/url/alt   │   │  description    │       │
//! │  │  available      │   └─────────────────┘   │  image          │       │
//! │  │  measurements   │                         │  whatsappMessage│       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │   local store shape        local store shape     remote table shape    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` and `CatalogEntry` describe the same conceptual item for two
//! independent persistence paths. Nothing converts between them.
//!
//! All types serialize in camelCase because the browser storefront and the
//! persisted JSON both use that shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Category
// =============================================================================

/// Fixed set of catalog categories. Serialized by their storefront label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Vestidos,
    Ternos,
    Casual,
    Festa,
    Executivo,
    #[serde(rename = "Cerimônia")]
    Cerimonia,
    Esportivo,
    Outros,
}

impl Category {
    /// Every category, in the order the admin form lists them.
    pub const ALL: [Category; 8] = [
        Category::Vestidos,
        Category::Ternos,
        Category::Casual,
        Category::Festa,
        Category::Executivo,
        Category::Cerimonia,
        Category::Esportivo,
        Category::Outros,
    ];

    /// Label shown in the storefront (and used on the wire).
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vestidos => "Vestidos",
            Category::Ternos => "Ternos",
            Category::Casual => "Casual",
            Category::Festa => "Festa",
            Category::Executivo => "Executivo",
            Category::Cerimonia => "Cerimônia",
            Category::Esportivo => "Esportivo",
            Category::Outros => "Outros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Case-insensitive label match. "Cerimonia" without the accent is
    /// accepted because query strings often drop it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == wanted || format!("{:?}", c).to_lowercase() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Size
// =============================================================================

/// Garment size, Brazilian lettering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Size {
    PP,
    P,
    M,
    G,
    GG,
    XGG,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::PP, Size::P, Size::M, Size::G, Size::GG, Size::XGG];

    pub fn label(&self) -> &'static str {
        match self {
            Size::PP => "PP",
            Size::P => "P",
            Size::M => "M",
            Size::G => "G",
            Size::GG => "GG",
            Size::XGG => "XGG",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Size::ALL
            .into_iter()
            .find(|size| size.label() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "size".to_string(),
                allowed: Size::ALL.iter().map(|s| s.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// Garment measurements. Free text so the admin can write "92cm" or "ajustável".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bust: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Measurements {
    /// Trims every field and drops blank ones. Returns `None` when nothing
    /// is left, so an untouched form section is stored as "no measurements".
    pub fn normalized(self) -> Option<Measurements> {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let m = Measurements {
            bust: clean(self.bust),
            waist: clean(self.waist),
            hips: clean(self.hips),
            length: clean(self.length),
            shoulder: clean(self.shoulder),
            sleeve: clean(self.sleeve),
            notes: clean(self.notes),
        };

        if m == Measurements::default() {
            None
        } else {
            Some(m)
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A rentable item in the local product collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the collection.
    pub id: String,

    pub name: String,

    pub category: Category,

    /// Free text, e.g. "R$ 120/dia". Never parsed as an amount.
    pub price: String,

    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// Primary image: URL or `data:` URI.
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_images: Option<Vec<String>>,

    #[serde(default)]
    pub description: String,

    /// Controls visibility in the public catalog.
    pub available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation; never earlier than `created_at`.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Input of the "add product" form.
///
/// `category` is optional here so that an unselected category is reported
/// as a validation error instead of a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    /// Caller-chosen identifier. Generated when absent.
    pub id: Option<String>,
    pub name: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub category: Option<Category>,
    pub price: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub size: Option<Size>,
    pub image: String,
    pub additional_images: Option<Vec<String>>,
    pub description: String,
    pub available: bool,
    pub measurements: Option<Measurements>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        ProductDraft {
            id: None,
            name: String::new(),
            category: None,
            price: String::new(),
            size: None,
            image: String::new(),
            additional_images: None,
            description: String::new(),
            // New products start visible, as in the admin form
            available: true,
            measurements: None,
        }
    }
}

/// Partial product update. Absent fields are left untouched.
///
/// For the nullable product fields the outer `Option` means "supplied" and
/// the inner one is the new value, so `{"size": null}` clears the size
/// while omitting `size` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<String>,
    #[serde(deserialize_with = "supplied_blank_as_none")]
    pub size: Option<Option<Size>>,
    pub image: Option<String>,
    #[serde(deserialize_with = "supplied")]
    pub additional_images: Option<Option<Vec<String>>>,
    pub description: Option<String>,
    pub available: Option<bool>,
    #[serde(deserialize_with = "supplied")]
    pub measurements: Option<Option<Measurements>>,
}

impl ProductPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

// =============================================================================
// Hero Banner
// =============================================================================

/// How the hero banner presents its images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum HeroMode {
    /// Only the first image is shown.
    #[default]
    Static,
    /// All images rotate on a timer.
    Carousel,
}

impl FromStr for HeroMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(HeroMode::Static),
            "carousel" => Ok(HeroMode::Carousel),
            _ => Err(ValidationError::NotAllowed {
                field: "mode".to_string(),
                allowed: vec!["static".to_string(), "carousel".to_string()],
            }),
        }
    }
}

/// One banner image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HeroImage {
    pub id: String,
    /// URL or `data:` URI.
    pub url: String,
    pub alt: String,
}

/// Input for adding a banner image. The id is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct NewHeroImage {
    pub url: String,
    pub alt: String,
}

/// Partial banner image update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct HeroImagePatch {
    pub url: Option<String>,
    pub alt: Option<String>,
}

/// Mode plus images, persisted as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HeroConfig {
    #[serde(default)]
    pub mode: HeroMode,
    pub images: Vec<HeroImage>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig {
            mode: HeroMode::Static,
            images: vec![HeroImage {
                id: "1".to_string(),
                url: "/assets/hero-collection.png".to_string(),
                alt: "Elegant fashion collection".to_string(),
            }],
        }
    }
}

// =============================================================================
// Catalog Entry (remote table row)
// =============================================================================

/// Row of the remote catalog table. All five fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Pre-filled message for the "rent via WhatsApp" button.
    pub whatsapp_message: String,
}

// =============================================================================
// Serde helpers
// =============================================================================

/// Blank or null strings become `None`; anything else goes through `FromStr`.
/// HTML selects submit `""` for "nothing chosen".
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn supplied_blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    blank_as_none(deserializer).map(Some)
}

/// Only called when the field is present, so `null` maps to `Some(None)`.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            let parsed: Category = category.label().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert_eq!("cerimonia".parse::<Category>().unwrap(), Category::Cerimonia);
        assert!("Sapatos".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_with_label() {
        let value = serde_json::to_value(Category::Cerimonia).unwrap();
        assert_eq!(value, json!("Cerimônia"));
    }

    #[test]
    fn test_measurements_normalized() {
        let blank = Measurements {
            bust: Some("  ".to_string()),
            notes: Some(String::new()),
            ..Measurements::default()
        };
        assert_eq!(blank.normalized(), None);

        let partial = Measurements {
            waist: Some(" 70cm ".to_string()),
            hips: Some(String::new()),
            ..Measurements::default()
        };
        let normalized = partial.normalized().unwrap();
        assert_eq!(normalized.waist.as_deref(), Some("70cm"));
        assert_eq!(normalized.hips, None);
    }

    #[test]
    fn test_draft_accepts_form_payload() {
        let draft: ProductDraft = serde_json::from_value(json!({
            "name": "Vestido X",
            "category": "",
            "price": "R$ 90/dia",
            "size": "",
        }))
        .unwrap();

        assert_eq!(draft.category, None);
        assert_eq!(draft.size, None);
        assert!(draft.available);
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let patch: ProductPatch = serde_json::from_value(json!({ "size": null })).unwrap();
        assert_eq!(patch.size, Some(None));
        assert_eq!(patch.measurements, None);

        let patch: ProductPatch = serde_json::from_value(json!({ "measurements": null })).unwrap();
        assert_eq!(patch.measurements, Some(None));

        let patch: ProductPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_hero_config_default_has_one_image() {
        let config = HeroConfig::default();
        assert_eq!(config.mode, HeroMode::Static);
        assert_eq!(config.images.len(), 1);
    }

    #[test]
    fn test_catalog_entry_wire_names() {
        let entry = CatalogEntry {
            id: "p1".to_string(),
            title: "Vestido X".to_string(),
            description: "d".to_string(),
            image: "http://x/i.jpg".to_string(),
            whatsapp_message: "m".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["whatsappMessage"], json!("m"));
    }
}
