//! Admin routes for the hero banner.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use vitrine_core::{HeroConfig, HeroImage, HeroImagePatch, HeroMode, NewHeroImage};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: HeroMode,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub images: Vec<HeroImage>,
}

pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<SetModeRequest>,
) -> ApiResult<Json<HeroConfig>> {
    Ok(Json(state.hero.set_mode(body.mode).await?))
}

pub async fn add_image(
    State(state): State<Arc<AppState>>,
    ApiJson(image): ApiJson<NewHeroImage>,
) -> ApiResult<(StatusCode, Json<HeroImage>)> {
    let image = state.hero.add_image(image).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

pub async fn reorder(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ReorderRequest>,
) -> ApiResult<Json<HeroConfig>> {
    Ok(Json(state.hero.reorder(body.images).await?))
}

pub async fn update_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<HeroImagePatch>,
) -> ApiResult<Json<HeroImage>> {
    state
        .hero
        .update_image(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Hero image", &id))
}

pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.hero.delete_image(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Hero image", &id))
    }
}
