//! Shared application state.

use std::sync::Arc;
use tokio::sync::Semaphore;

use afinar_core::{ModelDownloader, RecipeLauncher, RecipeRegistry, RuntimeConfig};

/// Shared application state with backpressure for long-running operations.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration the core services were built from
    pub config: RuntimeConfig,
    /// Builtin recipe catalog
    pub registry: RecipeRegistry,
    /// Hugging Face Hub downloader
    pub downloader: Arc<ModelDownloader>,
    /// Recipe subprocess launcher
    pub launcher: Arc<RecipeLauncher>,
    /// Limiter for downloads and runs to prevent resource exhaustion
    pub request_semaphore: Arc<Semaphore>,
    /// Download timeout (seconds)
    pub request_timeout_secs: u64,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Self {
        let max_concurrent = std::env::var("AFINAR_MAX_CONCURRENT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);

        let timeout = std::env::var("AFINAR_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let registry = RecipeRegistry::builtin();
        Self {
            downloader: Arc::new(ModelDownloader::new(config.clone())),
            launcher: Arc::new(RecipeLauncher::new(config.clone(), registry)),
            config,
            registry,
            request_semaphore: Arc::new(Semaphore::new(max_concurrent)),
            request_timeout_secs: timeout,
        }
    }

    /// Acquire a permit before starting a download or run.
    pub async fn acquire_permit(&self) -> tokio::sync::SemaphorePermit<'_> {
        self.request_semaphore
            .acquire()
            .await
            .expect("Semaphore should never be closed")
    }
}
