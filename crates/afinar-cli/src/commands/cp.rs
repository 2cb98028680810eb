use crate::error::Result;
use crate::http;
use crate::style::Theme;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct CopyResponse {
    path: PathBuf,
}

pub async fn execute(
    file: String,
    destination: String,
    no_clobber: bool,
    make_parents: bool,
    server: &str,
    theme: &Theme,
) -> Result<()> {
    let client = http::client(Some(std::time::Duration::from_secs(30)))?;
    let response = client
        .post(format!("{}/copy", server))
        .json(&json!({
            "file": file,
            "destination": destination,
            "no_clobber": no_clobber,
            "make_parents": make_parents,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(http::error_for(response).await);
    }

    let payload: CopyResponse = response.json().await?;
    theme.success(&format!("Copied {} to {}", file, payload.path.display()));
    Ok(())
}
