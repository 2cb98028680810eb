use std::path::PathBuf;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use afinar_core::copy_asset;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    pub file: String,
    pub destination: PathBuf,
    #[serde(default)]
    pub no_clobber: bool,
    #[serde(default)]
    pub make_parents: bool,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub path: PathBuf,
}

pub async fn copy(
    State(state): State<AppState>,
    Json(request): Json<CopyRequest>,
) -> Result<Json<CopyResponse>, ApiError> {
    info!(file = %request.file, destination = %request.destination.display(), "copy requested");
    let path = copy_asset(
        &state.registry,
        &request.file,
        &request.destination,
        request.no_clobber,
        request.make_parents,
    )?;
    Ok(Json(CopyResponse { path }))
}
