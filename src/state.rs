//! Application State
//!
//! Process-wide state an embedding shell holds: the configuration service
//! and the session orchestrator built from it.

use std::sync::Arc;
use tokio::sync::RwLock;

use casefile_backend::{AnalysisBackend, HttpAnalysisBackend};

use crate::models::settings::{ClientConfig, ClientConfigUpdate};
use crate::services::{DownloadSink, FileDownloadSink, Orchestrator};
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

/// Application state shared with the UI shell
pub struct AppState {
    /// Configuration service for client settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Orchestrator for the current session
    orchestrator: Arc<RwLock<Option<Orchestrator>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            orchestrator: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize from the config at the default location
    pub async fn initialize(&self) -> AppResult<()> {
        if *self.initialized.read().await {
            return Ok(());
        }
        let config = ConfigService::new()?;
        self.initialize_with(config).await
    }

    /// Initialize from an already opened config service
    pub async fn initialize_with(&self, config: ConfigService) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let orchestrator = build_orchestrator(config.get_config())?;
        tracing::info!(
            "[AppState] initialized with backend {} (config {})",
            config.get_config().backend_url,
            config.path().display()
        );

        *self.config.write().await = Some(config);
        *self.orchestrator.write().await = Some(orchestrator);
        *initialized = true;
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Handle to the session orchestrator
    pub async fn orchestrator(&self) -> AppResult<Orchestrator> {
        let guard = self.orchestrator.read().await;
        match &*guard {
            Some(orchestrator) => Ok(orchestrator.clone()),
            None => Err(AppError::config("Orchestrator not initialized")),
        }
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<ClientConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration.
    ///
    /// Changing any setting the backend or sink depends on rebuilds the
    /// orchestrator, which starts a fresh session. The new config is only
    /// saved once its orchestrator has been built.
    pub async fn update_config(&self, update: ClientConfigUpdate) -> AppResult<ClientConfig> {
        let mut guard = self.config.write().await;
        let service = match &mut *guard {
            Some(config) => config,
            None => return Err(AppError::config("Config service not initialized")),
        };

        let candidate = service.preview_update(update)?;
        let rebuilt = if &candidate != service.get_config() {
            Some(build_orchestrator(&candidate)?)
        } else {
            None
        };

        let updated = service.replace_config(candidate)?;
        if let Some(orchestrator) = rebuilt {
            *self.orchestrator.write().await = Some(orchestrator);
            tracing::info!("[AppState] configuration changed, session restarted");
        }
        Ok(updated)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn build_orchestrator(config: &ClientConfig) -> AppResult<Orchestrator> {
    let backend: Arc<dyn AnalysisBackend> =
        Arc::new(HttpAnalysisBackend::new(config.backend_config())?);
    let sink: Arc<dyn DownloadSink> =
        Arc::new(FileDownloadSink::new(config.resolve_download_dir()?));
    Ok(Orchestrator::new(backend, sink, config.report_prefix.clone()))
}
