//! Child profile handlers

use application::ProfileBoard;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{ChildProfile, ProfileId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use super::categories::CategoryResponse;
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
}

/// Profile, with the full board when fetched by ID
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Option<i64>,
    pub name: String,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryResponse>>,
}

impl From<ChildProfile> for ProfileResponse {
    fn from(profile: ChildProfile) -> Self {
        Self {
            id: profile.id.map(ProfileId::value),
            name: profile.name,
            user_id: profile.user_id.value(),
            categories: None,
        }
    }
}

impl From<ProfileBoard> for ProfileResponse {
    fn from(board: ProfileBoard) -> Self {
        Self {
            categories: Some(board.categories.into_iter().map(Into::into).collect()),
            ..board.profile.into()
        }
    }
}

/// GET /api/profiles/user/{userId}
pub async fn list_profiles(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let profiles = state
        .catalog_service
        .list_profiles(UserId::new(user_id))
        .await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

/// GET /api/profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let board = state.catalog_service.get_profile(ProfileId::new(id)).await?;
    Ok(Json(board.into()))
}

/// POST /api/profiles/user/{userId}
#[instrument(skip(state, request))]
pub async fn create_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    let profile = state
        .catalog_service
        .create_profile(UserId::new(user_id), &request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// PUT /api/profiles/{id}
pub async fn rename_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .catalog_service
        .rename_profile(ProfileId::new(id), &request.name)
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/profiles/{id}
///
/// Cascades to the profile's categories and tiles.
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog_service
        .delete_profile(ProfileId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
