use std::path::PathBuf;
use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use afinar_core::DownloadOptions;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub model_id: String,
    #[serde(default)]
    pub local_dir: Option<PathBuf>,
    #[serde(default)]
    pub hf_token: Option<String>,
    #[serde(default)]
    pub ignore_patterns: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub files: Vec<PathBuf>,
}

pub async fn download(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let _permit = state.acquire_permit().await;

    info!(model_id = %request.model_id, "download requested");

    let options = DownloadOptions {
        model_id: request.model_id,
        local_dir: request.local_dir,
        hf_token: request.hf_token,
        ignore_patterns: request.ignore_patterns,
        source: request.source,
    };

    let files = tokio::time::timeout(
        Duration::from_secs(state.request_timeout_secs),
        state.downloader.download(options),
    )
    .await
    .map_err(|_| ApiError::internal("Download timed out"))??;

    Ok(Json(DownloadResponse { files }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn empty_model_id_is_a_bad_request() {
        let (state, _dir) = test_state();
        let request = DownloadRequest {
            model_id: "".to_string(),
            local_dir: None,
            hf_token: None,
            ignore_patterns: None,
            source: None,
        };
        let err = download(State(state), Json(request)).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(!err.detail().is_empty());
    }

    #[tokio::test]
    async fn unknown_source_is_a_bad_request() {
        let (state, _dir) = test_state();
        let request = DownloadRequest {
            model_id: "gpt2".to_string(),
            local_dir: None,
            hf_token: None,
            ignore_patterns: None,
            source: Some("kaggle".to_string()),
        };
        let err = download(State(state), Json(request)).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
