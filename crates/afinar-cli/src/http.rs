use crate::error::{CliError, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

pub fn client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .no_proxy()
        .user_agent(format!("afinar-cli/{}", env!("CARGO_PKG_VERSION")));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| CliError::Other(format!("Failed to initialize HTTP client: {}", e)))
}

/// Turn a non-success response into an ApiError, preferring the server's
/// `detail` field over the raw body.
pub async fn error_for(response: reqwest::Response) -> CliError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.detail)
        .unwrap_or(body);
    CliError::ApiError { status, message }
}
