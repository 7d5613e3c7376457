//! Word tile handlers (`/api/imagewords`)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{CategoryId, Tile, TileId};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Create or update body for a tile
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TileRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub word: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TileResponse {
    pub id: Option<i64>,
    pub word: String,
    pub image_url: Option<String>,
}

impl From<Tile> for TileResponse {
    fn from(tile: Tile) -> Self {
        Self {
            id: tile.id.map(TileId::value),
            word: tile.word,
            image_url: tile.image_url,
        }
    }
}

pub(crate) fn tile_list(tiles: Vec<Tile>) -> Vec<TileResponse> {
    tiles.into_iter().map(TileResponse::from).collect()
}

/// GET /api/imagewords/category/{categoryId}
pub async fn list_tiles(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<TileResponse>>, ApiError> {
    let tiles = state
        .catalog_service
        .list_tiles(CategoryId::new(category_id))
        .await?;
    Ok(Json(tile_list(tiles)))
}

/// GET /api/imagewords/{id}
pub async fn get_tile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TileResponse>, ApiError> {
    let tile = state.catalog_service.get_tile(TileId::new(id)).await?;
    Ok(Json(tile.into()))
}

/// POST /api/imagewords/category/{categoryId}
#[instrument(skip(state, request))]
pub async fn create_tile(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<TileRequest>,
) -> Result<(StatusCode, Json<TileResponse>), ApiError> {
    let tile = state
        .catalog_service
        .create_tile(CategoryId::new(category_id), &request.word, request.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(tile.into())))
}

/// PUT /api/imagewords/{id}
pub async fn update_tile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<TileRequest>,
) -> Result<Json<TileResponse>, ApiError> {
    let tile = state
        .catalog_service
        .update_tile(TileId::new(id), &request.word, request.image_url)
        .await?;
    Ok(Json(tile.into()))
}

/// DELETE /api/imagewords/{id}
pub async fn delete_tile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog_service.delete_tile(TileId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
