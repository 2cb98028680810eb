//! Launching recipe runs as subprocesses.
//!
//! Builtin recipe scripts and configs are materialized under the configured
//! assets directory before launch; anything that is not a builtin name is
//! treated as a filesystem path to a custom recipe or config.

use serde::Serialize;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};
use crate::registry::{AssetKind, RecipeRegistry};

/// Parameters for a single recipe run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub recipe_name: String,
    pub config_name: String,
    pub distributed: bool,
    pub num_processes: u32,
    /// Extra `key=value` overrides forwarded to the recipe
    pub config_overrides: Vec<String>,
}

impl RunRequest {
    pub fn new(recipe_name: impl Into<String>, config_name: impl Into<String>) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            config_name: config_name.into(),
            distributed: false,
            num_processes: 1,
            config_overrides: Vec::new(),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub recipe: String,
    pub config: String,
    pub distributed: bool,
    pub num_processes: u32,
}

/// Resolves recipe/config names and launches the training subprocess.
pub struct RecipeLauncher {
    config: RuntimeConfig,
    registry: RecipeRegistry,
}

impl RecipeLauncher {
    pub fn new(config: RuntimeConfig, registry: RecipeRegistry) -> Self {
        Self { config, registry }
    }

    /// Run a recipe to completion. Returns once the subprocess exits.
    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome> {
        if request.num_processes == 0 {
            return Err(Error::InvalidRun(
                "num_processes must be at least 1".to_string(),
            ));
        }

        let script = self.resolve_recipe(request)?;
        let config_path = self.resolve_config(&request.config_name)?;

        let mut command = if request.distributed {
            let mut cmd = Command::new(&self.config.torchrun_bin);
            cmd.arg("--standalone")
                .arg("--nproc-per-node")
                .arg(request.num_processes.to_string())
                .arg(&script);
            cmd
        } else {
            let mut cmd = Command::new(&self.config.python_bin);
            cmd.arg(&script);
            cmd
        };
        command.arg("--config").arg(&config_path);
        command.args(&request.config_overrides);

        info!(
            recipe = %request.recipe_name,
            config = %request.config_name,
            distributed = request.distributed,
            num_processes = request.num_processes,
            "launching recipe"
        );

        let status = command.status().await.map_err(|source| Error::LaunchFailed {
            bin: if request.distributed {
                self.config.torchrun_bin.clone()
            } else {
                self.config.python_bin.clone()
            },
            source,
        })?;

        if !status.success() {
            return Err(Error::RunFailed {
                recipe: request.recipe_name.clone(),
                code: status.code(),
            });
        }

        info!(recipe = %request.recipe_name, "recipe run completed");
        Ok(RunOutcome {
            recipe: request.recipe_name.clone(),
            config: request.config_name.clone(),
            distributed: request.distributed,
            num_processes: request.num_processes,
        })
    }

    fn resolve_recipe(&self, request: &RunRequest) -> Result<PathBuf> {
        match self.registry.get(&request.recipe_name) {
            Ok(recipe) => {
                if request.distributed && !recipe.supports_distributed {
                    return Err(Error::DistributedUnsupported(request.recipe_name.clone()));
                }
                self.materialize(&request.recipe_name)
            }
            Err(_) => {
                // Custom recipe: the name is a path to a script.
                let path = PathBuf::from(&request.recipe_name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(Error::RecipeNotFound(request.recipe_name.clone()))
                }
            }
        }
    }

    fn resolve_config(&self, config_name: &str) -> Result<PathBuf> {
        match self.registry.find_asset(config_name) {
            Ok(asset) if asset.kind == AssetKind::Config => self.materialize(config_name),
            _ => {
                let path = PathBuf::from(config_name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(Error::ConfigNotFound(config_name.to_string()))
                }
            }
        }
    }

    /// Write an embedded asset under the assets dir unless already current.
    fn materialize(&self, name: &str) -> Result<PathBuf> {
        let asset = self.registry.find_asset(name)?;
        let path = self.config.assets_dir.join(asset.relative_path(name));
        let current = std::fs::read_to_string(&path)
            .map(|on_disk| on_disk == asset.contents)
            .unwrap_or(false);
        if !current {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            debug!(name, path = %path.display(), "materializing builtin asset");
            std::fs::write(&path, asset.contents)?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher(python_bin: &str) -> (RecipeLauncher, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig {
            assets_dir: dir.path().to_path_buf(),
            python_bin: python_bin.to_string(),
            torchrun_bin: "torchrun".to_string(),
            ..RuntimeConfig::default()
        };
        (
            RecipeLauncher::new(config, RecipeRegistry::builtin()),
            dir,
        )
    }

    #[tokio::test]
    async fn zero_processes_is_rejected() {
        let (launcher, _dir) = launcher("true");
        let mut request = RunRequest::new("full_finetune_single_device", "llama3_2/1B_full");
        request.num_processes = 0;
        assert!(matches!(
            launcher.run(&request).await.unwrap_err(),
            Error::InvalidRun(_)
        ));
    }

    #[tokio::test]
    async fn distributed_flag_requires_support() {
        let (launcher, _dir) = launcher("true");
        let mut request = RunRequest::new(
            "full_finetune_single_device",
            "llama3_2/1B_full_single_device",
        );
        request.distributed = true;
        request.num_processes = 2;
        assert!(matches!(
            launcher.run(&request).await.unwrap_err(),
            Error::DistributedUnsupported(_)
        ));
    }

    #[tokio::test]
    async fn unknown_recipe_is_not_found() {
        let (launcher, _dir) = launcher("true");
        let request = RunRequest::new("no_such_recipe", "llama3_2/1B_full_single_device");
        assert!(matches!(
            launcher.run(&request).await.unwrap_err(),
            Error::RecipeNotFound(_)
        ));
    }

    #[tokio::test]
    async fn unknown_config_is_not_found() {
        let (launcher, _dir) = launcher("true");
        let request = RunRequest::new("full_finetune_single_device", "no_such_config");
        assert!(matches!(
            launcher.run(&request).await.unwrap_err(),
            Error::ConfigNotFound(_)
        ));
    }

    #[tokio::test]
    async fn successful_run_reports_outcome() {
        // `true` ignores its arguments and exits 0.
        let (launcher, dir) = launcher("true");
        let request = RunRequest::new(
            "full_finetune_single_device",
            "llama3_2/1B_full_single_device",
        );
        let outcome = launcher.run(&request).await.unwrap();
        assert_eq!(outcome.recipe, "full_finetune_single_device");
        assert!(!outcome.distributed);
        // Assets were materialized for the subprocess.
        assert!(dir
            .path()
            .join("recipes/full_finetune_single_device.py")
            .exists());
        assert!(dir
            .path()
            .join("configs/llama3_2/1B_full_single_device.yaml")
            .exists());
    }

    #[tokio::test]
    async fn failing_subprocess_surfaces_exit_code() {
        let (launcher, _dir) = launcher("false");
        let request = RunRequest::new(
            "full_finetune_single_device",
            "llama3_2/1B_full_single_device",
        );
        match launcher.run(&request).await.unwrap_err() {
            Error::RunFailed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn custom_recipe_path_is_accepted() {
        let (launcher, dir) = launcher("true");
        let script = dir.path().join("my_recipe.py");
        std::fs::write(&script, "print('hi')\n").unwrap();
        let request = RunRequest::new(
            script.to_str().unwrap(),
            "llama3_2/1B_full_single_device",
        );
        assert!(launcher.run(&request).await.is_ok());
    }
}
