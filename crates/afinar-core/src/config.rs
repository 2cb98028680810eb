//! Runtime configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the afinar runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory where builtin recipe scripts and configs are materialized
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Python interpreter used for single-device runs
    #[serde(default = "default_python_bin")]
    pub python_bin: String,

    /// Launcher binary used for distributed runs
    #[serde(default = "default_torchrun_bin")]
    pub torchrun_bin: String,

    /// Cache directory for Hugging Face Hub downloads
    #[serde(default = "default_hf_cache_dir")]
    pub hf_cache_dir: PathBuf,

    /// Default Hugging Face token for gated repositories
    #[serde(default)]
    pub hf_token: Option<String>,
}

fn default_assets_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("afinar")
}

fn default_python_bin() -> String {
    "python3".to_string()
}

fn default_torchrun_bin() -> String {
    "torchrun".to_string()
}

fn default_hf_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("afinar")
        .join("hub")
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            python_bin: default_python_bin(),
            torchrun_bin: default_torchrun_bin(),
            hf_cache_dir: default_hf_cache_dir(),
            hf_token: None,
        }
    }
}

impl RuntimeConfig {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = non_empty_env("AFINAR_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(python) = non_empty_env("AFINAR_PYTHON") {
            config.python_bin = python;
        }
        if let Some(torchrun) = non_empty_env("AFINAR_TORCHRUN") {
            config.torchrun_bin = torchrun;
        }
        if let Some(dir) = non_empty_env("AFINAR_HF_CACHE_DIR") {
            config.hf_cache_dir = PathBuf::from(dir);
        }
        config.hf_token = non_empty_env("HF_TOKEN");
        config
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
