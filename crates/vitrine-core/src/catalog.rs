//! # Catalog Queries
//!
//! Read-only views over the product list: the admin dashboard filter, the
//! public catalog page with its incremental reveal, and dashboard counters.
//!
//! ## Public Catalog Flow
//! ```text
//! products ──► available only ──► category? ──► first `visible` items
//!                    │                               ▲
//!                    └──► categories (first seen)    │
//!                                                    │
//!        Reveal::initial() = 6 ── reveal_all() ──────┘
//! ```
//!
//! Each page request starts from `Reveal::initial()`, so picking another
//! category always shows the first 6 again.
//!
//! Every function here is pure and keeps the input order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Category, Product};
use crate::CATALOG_PAGE_SIZE;

// =============================================================================
// Admin Filter
// =============================================================================

/// Availability predicate of the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    pub fn matches(&self, available: bool) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => available,
            AvailabilityFilter::Unavailable => !available,
        }
    }
}

impl fmt::Display for AvailabilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AvailabilityFilter::All => "all",
            AvailabilityFilter::Available => "available",
            AvailabilityFilter::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

impl FromStr for AvailabilityFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(AvailabilityFilter::All),
            "available" => Ok(AvailabilityFilter::Available),
            "unavailable" => Ok(AvailabilityFilter::Unavailable),
            _ => Err(ValidationError::NotAllowed {
                field: "availability".to_string(),
                allowed: vec![
                    "all".to_string(),
                    "available".to_string(),
                    "unavailable".to_string(),
                ],
            }),
        }
    }
}

/// Admin dashboard filter. Every field is optional; an empty filter
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub availability: AvailabilityFilter,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        if !self.availability.matches(product.available) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Order-preserving subsequence of `products` that satisfies `filter`.
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Distinct categories in first-seen order.
pub fn categories<'a, I>(products: I) -> Vec<Category>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category);
        }
    }
    seen
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Counters shown at the top of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    pub categories: Vec<Category>,
}

impl AdminStats {
    pub fn compute(products: &[Product]) -> Self {
        let available = products.iter().filter(|p| p.available).count();
        AdminStats {
            total: products.len(),
            available,
            unavailable: products.len() - available,
            categories: categories(products),
        }
    }
}

// =============================================================================
// Public Catalog
// =============================================================================

/// Incremental reveal of the public grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    limit: usize,
}

impl Default for Reveal {
    fn default() -> Self {
        Reveal::initial()
    }
}

impl Reveal {
    pub fn initial() -> Self {
        Reveal {
            limit: CATALOG_PAGE_SIZE,
        }
    }

    /// Grows the prefix to the full filtered count.
    pub fn reveal_all(&mut self, total: usize) {
        self.limit = self.limit.max(total);
    }

    pub fn visible(&self, total: usize) -> usize {
        self.limit.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.limit
    }
}

/// One rendering of the public catalog.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub products: Vec<Product>,
    /// Available products matching the category, before the visible cut.
    pub total: usize,
    pub has_more: bool,
    pub selected_category: Option<Category>,
    /// Categories present among available products.
    pub categories: Vec<Category>,
}

/// Builds the public catalog page.
///
/// Only available products are shown. `expanded` is the "reveal all"
/// action; without it the page holds at most [`CATALOG_PAGE_SIZE`] items.
pub fn public_page(products: &[Product], category: Option<Category>, expanded: bool) -> CatalogPage {
    let available: Vec<&Product> = products.iter().filter(|p| p.available).collect();
    let categories = categories(available.iter().copied());

    let matching: Vec<&Product> = available
        .into_iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect();
    let total = matching.len();

    let mut reveal = Reveal::initial();
    if expanded {
        reveal.reveal_all(total);
    }

    CatalogPage {
        products: matching
            .into_iter()
            .take(reveal.visible(total))
            .cloned()
            .collect(),
        total,
        has_more: reveal.has_more(total),
        selected_category: category,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::demo_products;
    use chrono::Utc;

    fn sample(count: usize) -> Vec<Product> {
        let template = demo_products(Utc::now()).remove(0);
        (0..count)
            .map(|i| Product {
                id: format!("p{i}"),
                name: format!("Vestido {i}"),
                category: if i % 2 == 0 { Category::Vestidos } else { Category::Festa },
                available: i != 3,
                ..template.clone()
            })
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let products = demo_products(Utc::now());
        let filter = ProductFilter {
            search: Some("TERNO".to_string()),
            ..ProductFilter::default()
        };
        let found = filter_products(&products, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");

        let filter = ProductFilter {
            search: Some("dia a dia".to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(filter_products(&products, &filter)[0].id, "3");
    }

    #[test]
    fn test_filter_combines_predicates_and_keeps_order() {
        let products = sample(8);
        let filter = ProductFilter {
            category: Some(Category::Festa),
            availability: AvailabilityFilter::Available,
            ..ProductFilter::default()
        };
        let ids: Vec<&str> = filter_products(&products, &filter)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p5", "p7"]);

        let everything = filter_products(&products, &ProductFilter::default());
        assert_eq!(everything.len(), products.len());
    }

    #[test]
    fn test_availability_filter_parse() {
        assert_eq!("".parse::<AvailabilityFilter>().unwrap(), AvailabilityFilter::All);
        assert_eq!(
            "Unavailable".parse::<AvailabilityFilter>().unwrap(),
            AvailabilityFilter::Unavailable
        );
        assert!("sometimes".parse::<AvailabilityFilter>().is_err());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let products = demo_products(Utc::now());
        assert_eq!(
            categories(&products),
            vec![Category::Vestidos, Category::Ternos, Category::Casual]
        );
    }

    #[test]
    fn test_admin_stats() {
        let stats = AdminStats::compute(&demo_products(Utc::now()));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.unavailable, 1);
    }

    #[test]
    fn test_public_page_reveal() {
        let products = sample(10);

        let page = public_page(&products, None, false);
        assert_eq!(page.total, 9);
        assert_eq!(page.products.len(), CATALOG_PAGE_SIZE);
        assert!(page.has_more);
        assert!(page.products.iter().all(|p| p.available));

        let page = public_page(&products, None, true);
        assert_eq!(page.products.len(), 9);
        assert!(!page.has_more);
    }

    #[test]
    fn test_public_page_category() {
        let products = sample(10);
        let page = public_page(&products, Some(Category::Festa), false);
        assert_eq!(page.total, 4);
        assert!(page.products.iter().all(|p| p.category == Category::Festa));
        assert_eq!(page.categories, vec![Category::Vestidos, Category::Festa]);
    }

    #[test]
    fn test_reveal_all() {
        let mut reveal = Reveal::initial();
        assert_eq!(reveal.visible(20), CATALOG_PAGE_SIZE);
        assert!(reveal.has_more(20));
        assert_eq!(reveal.visible(2), 2);

        reveal.reveal_all(20);
        assert_eq!(reveal.visible(20), 20);
        assert!(!reveal.has_more(20));
    }

    #[test]
    fn test_category_change_starts_over() {
        let products = sample(20);
        let expanded = public_page(&products, None, true);
        assert_eq!(expanded.products.len(), 19);

        let page = public_page(&products, Some(Category::Vestidos), false);
        assert_eq!(page.total, 10);
        assert_eq!(page.products.len(), CATALOG_PAGE_SIZE);
        assert!(page.has_more);
    }
}
