//! Budget routes: owner-scoped monthly ceilings per category

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
    models::{NewBudget, UpdateBudget},
    state::AppState,
};

fn validate_month(month: i32) -> Result<(), ApiError> {
    if !(1..=12).contains(&month) {
        return Err(ApiError::Validation(
            "month must be between 1 and 12".to_string(),
        ));
    }
    Ok(())
}

/// List the user's budgets with their computed spent amounts
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let budgets = state.budget_repository.list_for_user(user.id).await?;
    Ok(Json(budgets))
}

/// Create a budget; duplicate (category, month, year) is a Conflict
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewBudget>,
) -> Result<impl IntoResponse, ApiError> {
    validate_month(payload.month)?;

    let budget = state.budget_repository.create(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

/// Retrieve one of the user's budgets
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let budget = state
        .budget_repository
        .find_for_user(user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Budget not found".to_string()))?;

    Ok(Json(budget))
}

/// Update one of the user's budgets
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBudget>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(month) = payload.month {
        validate_month(month)?;
    }

    let budget = state
        .budget_repository
        .update(user.id, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Budget not found".to_string()))?;

    Ok(Json(budget))
}

/// Delete one of the user's budgets
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.budget_repository.delete(user.id, id).await? {
        return Err(ApiError::NotFound("Budget not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_month() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
        assert!(validate_month(-3).is_err());
    }
}
