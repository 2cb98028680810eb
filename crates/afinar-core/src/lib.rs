//! afinar-core — domain library for the afinar fine-tuning service.
//!
//! Holds the builtin recipe registry, Hugging Face Hub downloads, asset
//! copying, config validation, and subprocess launch of recipe runs. The
//! HTTP surface in `afinar-server` is a thin layer over this crate.

pub mod config;
pub mod copy;
pub mod download;
pub mod error;
pub mod registry;
pub mod run;
pub mod validate;

pub use config::RuntimeConfig;
pub use copy::copy_asset;
pub use download::{DownloadOptions, ModelDownloader};
pub use error::{Error, Result};
pub use registry::{Recipe, RecipeConfig, RecipeDescriptor, RecipeRegistry};
pub use run::{RecipeLauncher, RunOutcome, RunRequest};
pub use validate::{config_settings, validate_config, ConfigReport};
