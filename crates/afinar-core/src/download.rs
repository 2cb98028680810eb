//! Model downloads from the Hugging Face Hub.

use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};

/// Marker written next to downloaded checkpoints so later adapter exports
/// can recover the originating repository.
pub const REPO_ID_FILE: &str = "original_repo_id.json";

const SUPPORTED_SOURCE: &str = "huggingface";

/// Parameters for a single model download.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Hub repository id, `owner/name` or a bare model name
    pub model_id: String,
    /// Target directory; defaults to `$TMPDIR/<model name>`
    pub local_dir: Option<PathBuf>,
    /// Token overriding the configured one, for gated repositories
    pub hf_token: Option<String>,
    /// Comma-separated glob patterns of files to skip
    pub ignore_patterns: Option<String>,
    /// Hub to download from; only `huggingface` is supported
    pub source: Option<String>,
}

/// Downloads model snapshots into caller-chosen directories.
pub struct ModelDownloader {
    config: RuntimeConfig,
}

impl ModelDownloader {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Fetch every file of the repository into the target directory and
    /// return the resulting paths.
    pub async fn download(&self, options: DownloadOptions) -> Result<Vec<PathBuf>> {
        let model_id = validate_model_id(&options.model_id)?;
        if let Some(source) = options.source.as_deref() {
            if source != SUPPORTED_SOURCE {
                return Err(Error::InvalidSource(source.to_string()));
            }
        }

        let model_name = model_id.rsplit('/').next().unwrap_or(&model_id);
        let local_dir = options
            .local_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(model_name));
        let token = options.hf_token.clone().or_else(|| self.config.hf_token.clone());
        let cache_dir = self.config.hf_cache_dir.clone();
        let patterns = parse_patterns(options.ignore_patterns.as_deref());

        info!(%model_id, local_dir = %local_dir.display(), "downloading model");

        // The hub client is synchronous; keep it off the async workers.
        let files = tokio::task::spawn_blocking(move || {
            download_snapshot(&model_id, &local_dir, token, &patterns, &cache_dir)
        })
        .await
        .map_err(|e| Error::DownloadFailed(e.to_string()))??;

        info!(count = files.len(), "download complete");
        Ok(files)
    }
}

fn validate_model_id(model_id: &str) -> Result<String> {
    let model_id = model_id.trim();
    let well_formed = !model_id.is_empty()
        && !model_id.chars().any(char::is_whitespace)
        && model_id.split('/').count() <= 2
        && model_id.split('/').all(|part| !part.is_empty());
    if !well_formed {
        return Err(Error::InvalidModelId(model_id.to_string()));
    }
    Ok(model_id.to_string())
}

fn download_snapshot(
    model_id: &str,
    local_dir: &Path,
    token: Option<String>,
    ignore_patterns: &[String],
    cache_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let api = hf_hub::api::sync::ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .with_token(token)
        .build()
        .map_err(|e| Error::DownloadFailed(format!("failed to initialize hub client: {e}")))?;

    let repo = api.model(model_id.to_string());
    let info = repo.info().map_err(|e| map_hub_error(model_id, &e))?;

    std::fs::create_dir_all(local_dir)?;

    let mut files = Vec::new();
    for sibling in &info.siblings {
        let name = sibling.rfilename.as_str();
        if ignore_patterns.iter().any(|p| glob_match(p, name)) {
            debug!(file = name, "skipping ignored file");
            continue;
        }
        let cached = repo.get(name).map_err(|e| map_hub_error(model_id, &e))?;
        let dest = local_dir.join(name);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if cached != dest {
            std::fs::copy(&cached, &dest)?;
        }
        files.push(dest);
    }

    let marker = local_dir.join(REPO_ID_FILE);
    std::fs::write(
        &marker,
        serde_json::to_string_pretty(&json!({ "repo_id": model_id }))
            .map_err(|e| Error::DownloadFailed(e.to_string()))?,
    )?;
    files.push(marker);

    Ok(files)
}

fn map_hub_error(model_id: &str, err: &hf_hub::api::sync::ApiError) -> Error {
    let message = err.to_string();
    if message.contains("404") {
        Error::RepoNotFound(model_id.to_string())
    } else if message.contains("401") || message.contains("403") {
        Error::RepoGated(model_id.to_string())
    } else {
        Error::DownloadFailed(message)
    }
}

fn parse_patterns(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Minimal glob matching: `*` matches any run of characters, everything
/// else matches literally.
fn glob_match(pattern: &str, name: &str) -> bool {
    fn inner(pattern: &[u8], name: &[u8]) -> bool {
        match (pattern.first(), name.first()) {
            (None, None) => true,
            (Some(b'*'), _) => {
                inner(&pattern[1..], name) || (!name.is_empty() && inner(pattern, &name[1..]))
            }
            (Some(p), Some(n)) if p == n => inner(&pattern[1..], &name[1..]),
            _ => false,
        }
    }
    inner(pattern.as_bytes(), name.as_bytes())
}
