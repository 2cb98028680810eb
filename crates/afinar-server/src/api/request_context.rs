//! Request correlation.
//!
//! Every request gets a correlation id, either taken from the caller's
//! `x-request-id` header or freshly generated, and the id is echoed back on
//! the response so training runs can be traced across services.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub correlation_id: String,
}

pub async fn attach_request_context(mut req: Request, next: Next) -> Response {
    let correlation_id = correlation_id_from(req.headers());

    req.extensions_mut().insert(RequestContext {
        correlation_id: correlation_id.clone(),
    });

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn correlation_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
