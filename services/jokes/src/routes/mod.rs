//! Jokes service routes

pub mod joke;
pub mod jokes;
pub mod login;
pub mod new_joke;
pub mod random;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use minijinja::context;
use serde_json::json;
use tracing::error;

use crate::{error::AppError, state::AppState, views};

/// Create the router for the jokes service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/jokes", get(random::index))
        .route("/jokes/", get(random::index))
        .route("/jokes/new", get(new_joke::show).post(new_joke::submit))
        .route("/jokes/:joke_id", get(joke::show).post(joke::submit))
        .route("/login", get(login::show).post(login::submit))
        .route("/logout", get(login::logout_page).post(login::logout))
        .fallback(not_found)
        .with_state(state)
}

/// Landing page
pub async fn home() -> Response {
    views::page(StatusCode::OK, "home.html", context! {})
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.jokes.count().await {
        Ok(_) => Json(json!({
            "status": "ok",
            "service": "jokes"
        }))
        .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "service": "jokes"
                })),
            )
                .into_response()
        }
    }
}

async fn not_found() -> AppError {
    AppError::not_found("Not Found")
}
