//! Public routes: health, catalog page, product detail, hero banner.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vitrine_core::catalog::{public_page, CatalogPage};
use vitrine_core::{Category, HeroConfig, Product};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
    /// Logged-in admin sessions that have not expired.
    pub admin_sessions: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        products: state.products.list().await.len(),
        admin_sessions: state.sessions.active_count().await,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Category label. Blank or "Todos" means every category.
    pub category: Option<String>,
    /// The "reveal all" action.
    pub expanded: bool,
}

/// Parses the category filter of the public grid.
pub(crate) fn parse_category(raw: Option<&str>) -> ApiResult<Option<Category>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(all) if all.eq_ignore_ascii_case("todos") || all.eq_ignore_ascii_case("all") => Ok(None),
        Some(label) => Ok(Some(label.parse::<Category>()?)),
    }
}

pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<CatalogQuery>,
) -> ApiResult<Json<CatalogPage>> {
    let category = parse_category(query.category.as_deref())?;
    let products = state.products.list().await;
    Ok(Json(public_page(&products, category, query.expanded)))
}

/// Unavailable products are hidden from the public surface.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .products
        .get(&id)
        .await
        .filter(|p| p.available)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &id))
}

pub async fn get_hero(State(state): State<Arc<AppState>>) -> Json<HeroConfig> {
    Json(state.hero.config().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(parse_category(Some("Todos")).unwrap(), None);
        assert_eq!(parse_category(Some("festa")).unwrap(), Some(Category::Festa));
        assert!(parse_category(Some("Sapatos")).is_err());
    }
}
