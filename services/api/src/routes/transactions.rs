//! Transaction routes: the owner-scoped ledger

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
    models::{NewTransaction, UpdateTransaction},
    state::AppState,
};

/// List the authenticated user's transactions, date descending
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.transaction_repository.list_for_user(user.id).await?;
    Ok(Json(transactions))
}

/// Create a transaction; the owner is always the authenticated user
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .transaction_repository
        .create(user.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Retrieve one of the user's transactions; another user's ID is
/// indistinguishable from a missing one
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .transaction_repository
        .find_for_user(user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Transaction not found".to_string()))?;

    Ok(Json(transaction))
}

/// Update one of the user's transactions
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .transaction_repository
        .update(user.id, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Transaction not found".to_string()))?;

    Ok(Json(transaction))
}

/// Delete one of the user's transactions
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.transaction_repository.delete(user.id, id).await? {
        return Err(ApiError::NotFound("Transaction not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
