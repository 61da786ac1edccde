//! Goal routes: owner-scoped savings goals

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::{NewGoal, UpdateGoal},
    state::AppState,
};

/// List the user's goals
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let goals = state.goal_repository.list_for_user(user.id).await?;
    Ok(Json(goals))
}

/// Create a goal
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewGoal>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Goal name is required".to_string()));
    }

    let goal = state.goal_repository.create(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// Retrieve one of the user's goals
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state
        .goal_repository
        .find_for_user(user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

    Ok(Json(goal))
}

/// Update one of the user's goals
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGoal>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state
        .goal_repository
        .update(user.id, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

    Ok(Json(goal))
}

/// Delete one of the user's goals
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.goal_repository.delete(user.id, id).await? {
        return Err(ApiError::NotFound("Goal not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
