//! User settings routes: profile fields, avatar, password change, and
//! account deletion

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::UpdateUserSettings,
    state::AppState,
    validation::validate_email,
};

/// Request for a password change
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Retrieve the user's settings, avatar included
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state
        .user_repository
        .get_settings(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(settings))
}

/// Apply a partial settings update; the user fields and the profile
/// avatar are written atomically
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateUserSettings>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(email) = &payload.email {
        validate_email(email).map_err(ApiError::Validation)?;
    }

    let settings = state
        .user_repository
        .update_settings(user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(settings))
}

/// Change the user's password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_password = payload
        .new_password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("new_password is required".to_string()))?;

    state
        .user_repository
        .update_password(user.id, new_password)
        .await?;

    Ok(Json(json!({"message": "Password updated"})))
}

/// Irreversibly delete the authenticated account and everything owned
/// by it
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.user_repository.delete(user.id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!("Account deleted: {}", user.id);
    Ok(StatusCode::NO_CONTENT)
}
