use crate::error::Result;
use crate::http;
use crate::style::Theme;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct RunResponse {
    recipe: String,
    config: String,
    distributed: bool,
    num_processes: u32,
    status: String,
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    recipe: String,
    config: String,
    distributed: bool,
    num_processes: u32,
    overrides: Vec<String>,
    server: &str,
    theme: &Theme,
) -> Result<()> {
    theme.info(&format!("Running {} with {}...", recipe, config));

    // Training runs take a while; no client-side timeout.
    let client = http::client(None)?;
    let response = client
        .post(format!("{}/run", server))
        .json(&json!({
            "recipe_name": recipe,
            "config_name": config,
            "distributed": distributed,
            "num_processes": num_processes,
            "config_overrides": overrides,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(http::error_for(response).await);
    }

    let payload: RunResponse = response.json().await?;
    let mode = if payload.distributed {
        format!("distributed across {} processes", payload.num_processes)
    } else {
        "single device".to_string()
    };
    theme.success(&format!(
        "{} ({}) {} with {}",
        payload.recipe, mode, payload.status, payload.config
    ));
    Ok(())
}
