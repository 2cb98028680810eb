use axum::{extract::Request, middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::api::request_context::{attach_request_context, REQUEST_ID_HEADER};
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            correlation_id = %request_id
        )
    });

    Router::new()
        .merge(crate::api::hub::router())
        .merge(crate::api::recipes::router())
        .merge(crate::api::assets::router())
        .merge(crate::api::runs::router())
        .merge(crate::api::validate::router())
        .merge(crate::api::internal::router())
        .layer(trace_layer)
        .layer(middleware::from_fn(attach_request_context))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
