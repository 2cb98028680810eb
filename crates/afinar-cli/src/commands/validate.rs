use crate::error::Result;
use crate::http;
use crate::style::Theme;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    valid: bool,
    components: usize,
}

pub async fn execute(config: String, server: &str, theme: &Theme) -> Result<()> {
    let client = http::client(Some(std::time::Duration::from_secs(30)))?;
    let response = client
        .post(format!("{}/validate", server))
        .json(&json!({ "config": config }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(http::error_for(response).await);
    }

    let payload: ValidateResponse = response.json().await?;
    if payload.valid {
        theme.success(&format!(
            "{} is valid ({} components)",
            config, payload.components
        ));
    }
    Ok(())
}
