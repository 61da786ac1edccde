//! Category routes: global, shared across all users

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{NewCategory, UpdateCategory},
    state::AppState,
};

/// List all categories
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.category_repository.list().await?;
    Ok(Json(categories))
}

/// Create a category
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Category name is required".to_string()));
    }

    let category = state.category_repository.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Retrieve a category by ID
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .category_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

/// Update a category
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategory>,
) -> Result<impl IntoResponse, ApiError> {
    if matches!(payload.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Err(ApiError::Validation("Category name is required".to_string()));
    }

    let category = state
        .category_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

/// Delete a category; fails with Conflict while transactions or
/// budgets still reference it
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.category_repository.delete(id).await? {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Seed the fixed default catalogue; reports only the newly inserted
/// count, existing pairs are skipped silently
pub async fn create_defaults(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .category_repository
        .create_defaults(&state.default_catalogue)
        .await?;

    Ok(Json(json!({ "created": created })))
}
