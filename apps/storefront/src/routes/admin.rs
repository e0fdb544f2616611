//! Admin routes: login/logout and product management.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use vitrine_core::catalog::{filter_products, AdminStats, AvailabilityFilter, ProductFilter};
use vitrine_core::validation::validate_search_query;
use vitrine_core::{Product, ProductDraft, ProductPatch};

use crate::auth::AdminToken;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::routes::catalog::parse_category;
use crate::state::AppState;

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state.sessions.login(&body.password).await?;
    Ok(Json(LoginResponse { token }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(AdminToken(token)): Extension<AdminToken>,
) -> StatusCode {
    state.sessions.logout(&token).await;
    StatusCode::NO_CONTENT
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminProductList {
    pub products: Vec<Product>,
    /// Counters over the whole collection, not the filtered view.
    pub stats: AdminStats,
}

pub async fn list_products(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<AdminProductQuery>,
) -> ApiResult<Json<AdminProductList>> {
    let search = query
        .search
        .as_deref()
        .map(validate_search_query)
        .transpose()?
        .filter(|s| !s.is_empty());

    let availability = match query.availability.as_deref() {
        Some(raw) => raw.parse::<AvailabilityFilter>()?,
        None => AvailabilityFilter::All,
    };

    let filter = ProductFilter {
        search,
        category: parse_category(query.category.as_deref())?,
        availability,
    };

    let all = state.products.list().await;
    let products = filter_products(&all, &filter).into_iter().cloned().collect();

    Ok(Json(AdminProductList {
        products,
        stats: AdminStats::compute(&all),
    }))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.products.add(draft).await?;
    info!(id = %product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Admin detail view. Unlike the public route it shows unavailable products.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .products
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &id))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Json<Product>> {
    state
        .products
        .update(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &id))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.products.remove(&id).await? {
        info!(id = %id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Product", &id))
    }
}

pub async fn toggle_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .products
        .toggle_availability(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", &id))
}
