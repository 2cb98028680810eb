use crate::error::Result;
use crate::http;
use crate::style::Theme;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct DownloadResponse {
    files: Vec<PathBuf>,
}

pub async fn execute(
    model_id: String,
    output_dir: Option<String>,
    hf_token: Option<String>,
    ignore_patterns: Option<String>,
    server: &str,
    theme: &Theme,
) -> Result<()> {
    theme.info(&format!("Downloading '{}'...", model_id));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("static template"),
    );
    spinner.set_message("Fetching model files...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let client = http::client(None)?;
    let response = client
        .post(format!("{}/download", server))
        .json(&json!({
            "model_id": model_id,
            "local_dir": output_dir,
            "hf_token": hf_token,
            "ignore_patterns": ignore_patterns,
        }))
        .send()
        .await;

    spinner.finish_and_clear();

    let response = response?;
    if !response.status().is_success() {
        return Err(http::error_for(response).await);
    }

    let payload: DownloadResponse = response.json().await?;
    theme.success(&format!("Downloaded {} files", payload.files.len()));
    for file in &payload.files {
        println!("  {}", file.display());
    }

    Ok(())
}
