//! Authentication routes: register, login, token refresh

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    jwt::TokenType,
    models::{LoginCredentials, NewUser},
    state::AppState,
    validation::{validate_email, validate_password, validate_username},
};

/// Response for token generation
#[derive(Serialize)]
pub struct TokenResponse {
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request for token refresh
#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response for token refresh
#[derive(Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

fn issue_token_pair(state: &AppState, username: &str, user_id: uuid::Uuid) -> ApiResult<TokenResponse> {
    let access_token = state
        .jwt_service
        .generate_access_token(user_id)
        .map_err(|e| {
            error!("Failed to generate access token: {}", e);
            ApiError::InternalServerError
        })?;

    let refresh_token = state
        .jwt_service
        .generate_refresh_token(user_id)
        .map_err(|e| {
            error!("Failed to generate refresh token: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(TokenResponse {
        username: username.to_string(),
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    })
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Registration attempt for user: {}", payload.username);

    validate_username(&payload.username).map_err(ApiError::Validation)?;
    validate_email(&payload.email).map_err(ApiError::Validation)?;
    validate_password(&payload.password).map_err(ApiError::Validation)?;

    // The username's unique constraint backstops this under
    // concurrent registration
    if state
        .user_repository
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }

    let user = state.user_repository.create(&payload).await?;
    let response = issue_token_pair(&state, &user.username, user.id)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for user: {}", payload.username);

    // Same response for unknown username and wrong password
    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !state.user_repository.verify_password(&user, &payload.password)? {
        return Err(ApiError::Unauthorized);
    }

    let response = issue_token_pair(&state, &user.username, user.id)?;

    Ok((StatusCode::OK, Json(response)))
}

/// Refresh token endpoint: exchanges a valid refresh token for a new
/// access token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = state
        .jwt_service
        .validate_token(&payload.refresh_token)
        .map_err(|_| ApiError::Unauthorized)?;

    if claims.token_type != TokenType::Refresh {
        return Err(ApiError::Unauthorized);
    }

    // The subject must still have an account
    state
        .user_repository
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = state
        .jwt_service
        .generate_access_token(claims.sub)
        .map_err(|e| {
            error!("Failed to generate access token: {}", e);
            ApiError::InternalServerError
        })?;

    let response = RefreshTokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    };

    Ok((StatusCode::OK, Json(response)))
}
