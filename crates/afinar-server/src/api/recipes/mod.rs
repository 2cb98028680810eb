//! Recipe catalog endpoints.

pub mod handlers;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(handlers::list_recipes))
        .route("/signatures", get(handlers::signatures))
        .route("/configs", get(handlers::configs))
        .route("/models", get(handlers::models))
        .route("/settings", get(handlers::settings))
}
