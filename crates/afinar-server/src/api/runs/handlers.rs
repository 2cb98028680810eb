use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use afinar_core::RunRequest;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequestBody {
    pub recipe_name: String,
    pub config_name: String,
    #[serde(default)]
    pub distributed: bool,
    #[serde(default = "default_num_processes")]
    pub num_processes: u32,
    #[serde(default)]
    pub config_overrides: Vec<String>,
}

fn default_num_processes() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub recipe: String,
    pub config: String,
    pub distributed: bool,
    pub num_processes: u32,
    pub status: &'static str,
}

pub async fn run(
    State(state): State<AppState>,
    Json(body): Json<RunRequestBody>,
) -> Result<Json<RunResponse>, ApiError> {
    let _permit = state.acquire_permit().await;

    info!(recipe = %body.recipe_name, config = %body.config_name, "run requested");

    let request = RunRequest {
        recipe_name: body.recipe_name,
        config_name: body.config_name,
        distributed: body.distributed,
        num_processes: body.num_processes,
        config_overrides: body.config_overrides,
    };

    let outcome = state.launcher.run(&request).await?;

    Ok(Json(RunResponse {
        recipe: outcome.recipe,
        config: outcome.config,
        distributed: outcome.distributed,
        num_processes: outcome.num_processes,
        status: "completed",
    }))
}
