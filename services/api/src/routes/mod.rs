//! API routes
//!
//! Public routes: health, register/login/refresh, and the category
//! seeding endpoint. Everything else sits behind the bearer-token
//! middleware.

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod income;
pub mod settings;
pub mod summary;
pub mod transactions;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/categories/",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/:id/",
            get(categories::retrieve)
                .put(categories::update)
                .patch(categories::update)
                .delete(categories::destroy),
        )
        .route(
            "/transactions/",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/:id/",
            get(transactions::retrieve)
                .put(transactions::update)
                .patch(transactions::update)
                .delete(transactions::destroy),
        )
        .route("/budgets/", get(budgets::list).post(budgets::create))
        .route(
            "/budgets/:id/",
            get(budgets::retrieve)
                .put(budgets::update)
                .patch(budgets::update)
                .delete(budgets::destroy),
        )
        .route("/goals/", get(goals::list).post(goals::create))
        .route(
            "/goals/:id/",
            get(goals::retrieve)
                .put(goals::update)
                .patch(goals::update)
                .delete(goals::destroy),
        )
        .route("/summary/", get(summary::monthly_summary))
        .route(
            "/income/",
            get(income::retrieve)
                .put(income::update)
                .patch(income::update),
        )
        .route(
            "/settings/",
            get(settings::retrieve)
                .put(settings::update)
                .patch(settings::update),
        )
        .route("/settings/password/", put(settings::change_password))
        .route("/settings/delete/", delete(settings::delete_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register/", post(auth::register))
        .route("/auth/login/", post(auth::login))
        .route("/auth/refresh/", post(auth::refresh_token))
        .route(
            "/categories/create-defaults/",
            post(categories::create_defaults),
        )
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "spendly-api"
    }))
}
