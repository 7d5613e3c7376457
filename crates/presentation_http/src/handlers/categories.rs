//! Category handlers

use application::CategoryBoard;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{Category, CategoryId, ProfileId};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use super::tiles::{TileResponse, tile_list};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Category, with its tiles when the full board was requested
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Option<i64>,
    pub name: String,
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TileResponse>>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.map(CategoryId::value),
            name: category.name,
            image_url: category.image_url,
            items: None,
        }
    }
}

impl From<CategoryBoard> for CategoryResponse {
    fn from(board: CategoryBoard) -> Self {
        Self {
            items: Some(tile_list(board.tiles)),
            ..board.category.into()
        }
    }
}

/// GET /api/categories/profile/{profileId}
pub async fn list_categories(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state
        .catalog_service
        .list_categories(ProfileId::new(profile_id))
        .await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let board = state
        .catalog_service
        .get_category(CategoryId::new(id))
        .await?;
    Ok(Json(board.into()))
}

/// POST /api/categories/profile/{profileId}
#[instrument(skip(state, request))]
pub async fn create_category(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state
        .catalog_service
        .create_category(ProfileId::new(profile_id), &request.name, request.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .catalog_service
        .update_category(CategoryId::new(id), &request.name, request.image_url)
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /api/categories/{id}
///
/// Removes the category's tiles too.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog_service
        .delete_category(CategoryId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
