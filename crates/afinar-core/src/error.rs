//! Error types for afinar

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Recipe not found: {0}. Use the recipe listing to see all available recipes.")]
    RecipeNotFound(String),

    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    #[error(
        "Invalid file name: {0}. Use the recipe listing to see all available files to copy."
    )]
    UnknownAsset(String),

    #[error("File already exists at {0}, not overwriting")]
    DestinationExists(PathBuf),

    #[error(
        "Cannot create regular file '{0}': parent directory does not exist. \
         Set make_parents=true to create parent directories automatically."
    )]
    MissingParent(PathBuf),

    #[error("Invalid model id: {0}")]
    InvalidModelId(String),

    #[error("Invalid download source: {0}. Must be 'huggingface'")]
    InvalidSource(String),

    #[error("Repository '{0}' not found on the Hugging Face Hub")]
    RepoNotFound(String),

    #[error(
        "Access denied for '{0}'. Provide a Hugging Face token via hf_token to \
         access gated repositories."
    )]
    RepoGated(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid run request: {0}")]
    InvalidRun(String),

    #[error("Recipe {0} does not support distributed training")]
    DistributedUnsupported(String),

    #[error("Recipe run failed with exit code {code:?}: {recipe}")]
    RunFailed { recipe: String, code: Option<i32> },

    #[error("Failed to launch {bin}: {source}")]
    LaunchFailed {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Error::DownloadFailed(_)
                | Error::RunFailed { .. }
                | Error::LaunchFailed { .. }
                | Error::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
