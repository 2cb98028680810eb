use std::path::PathBuf;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use afinar_core::validate_config;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub config: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub components: usize,
    pub settings: Vec<String>,
}

pub async fn validate(
    State(_state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    info!(config = %request.config.display(), "validating config");
    let report = validate_config(&request.config)?;
    Ok(Json(ValidateResponse {
        valid: true,
        components: report.components,
        settings: report.top_level_keys,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn valid_config_passes() {
        let (state, dir) = test_state();
        let path = dir.path().join("cfg.yaml");
        std::fs::write(
            &path,
            "model:\n  _component_: torchtune.models.llama3_2.llama3_2_1b\nepochs: 1\n",
        )
        .unwrap();

        let Json(response) = validate(State(state), Json(ValidateRequest { config: path }))
            .await
            .unwrap();
        assert!(response.valid);
        assert_eq!(response.components, 1);
        assert_eq!(response.settings, vec!["model", "epochs"]);
    }

    #[tokio::test]
    async fn malformed_yaml_is_a_bad_request() {
        let (state, dir) = test_state();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "model: [unclosed\n").unwrap();

        let err = validate(State(state), Json(ValidateRequest { config: path }))
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(!err.detail().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_a_bad_request() {
        let (state, dir) = test_state();
        let err = validate(
            State(state),
            Json(ValidateRequest {
                config: dir.path().join("absent.yaml"),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
