//! Builtin asset copying.

pub mod handlers;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/copy", post(handlers::copy))
}
