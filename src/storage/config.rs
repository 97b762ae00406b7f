//! JSON Configuration Management
//!
//! Reads and writes the client configuration file. A missing file is
//! created with defaults; an invalid one is an error rather than being
//! silently replaced.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{ClientConfig, ClientConfigUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_casefile_dir, ensure_dir};

/// Configuration service for the client settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: ClientConfig,
}

impl ConfigService {
    /// Open the config at the default location (~/.casefile/config.json)
    pub fn new() -> AppResult<Self> {
        ensure_casefile_dir()?;
        Self::open(config_path()?)
    }

    /// Open the config at `path`, writing defaults if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = path.into();
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            if let Some(parent) = config_path.parent() {
                ensure_dir(parent)?;
            }
            let default_config = ClientConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            tracing::info!("[Config] wrote default config to {}", config_path.display());
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    fn load_from_file(path: &Path) -> AppResult<ClientConfig> {
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    fn save_to_file(path: &Path, config: &ClientConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get_config_clone(&self) -> ClientConfig {
        self.config.clone()
    }

    /// Apply a partial update and persist it. The in-memory config is left
    /// untouched if the result does not validate.
    pub fn update_config(&mut self, update: ClientConfigUpdate) -> AppResult<ClientConfig> {
        let candidate = self.preview_update(update)?;
        self.replace_config(candidate)
    }

    /// The validated config `update` would produce. Nothing is written.
    pub fn preview_update(&self, update: ClientConfigUpdate) -> AppResult<ClientConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update);
        candidate.validate().map_err(AppError::validation)?;
        Ok(candidate)
    }

    /// Persist `config` and make it current.
    pub fn replace_config(&mut self, config: ClientConfig) -> AppResult<ClientConfig> {
        Self::save_to_file(&self.config_path, &config)?;
        self.config = config;
        Ok(self.config.clone())
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = ClientConfig::default();
        Self::save_to_file(&self.config_path, &self.config)
    }

    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}
