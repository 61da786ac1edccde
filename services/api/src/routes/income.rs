//! Income setting routes: a per-user singleton with get-or-create
//! semantics

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::ApiError, middleware::AuthUser, models::UpdateIncomeSetting, state::AppState,
};

/// Retrieve the user's income setting, creating a zero-income record
/// on first access
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let setting = state.income_repository.get_or_create(user.id).await?;
    Ok(Json(setting))
}

/// Set the user's monthly income
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateIncomeSetting>,
) -> Result<impl IntoResponse, ApiError> {
    let setting = state
        .income_repository
        .upsert(user.id, payload.monthly_income)
        .await?;

    Ok(Json(setting))
}
