//! Settings Models
//!
//! Client configuration stored in `config.json`.

use std::path::PathBuf;
use std::time::Duration;

use casefile_backend::{BackendConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::utils::error::AppResult;
use crate::utils::paths::default_download_dir;

/// Default file name prefix of exported reports.
pub const DEFAULT_REPORT_PREFIX: &str = "Casefile_Detailed_Report";

/// Upper bound accepted for `request_timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 3_600;

/// Client configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the analysis service
    pub backend_url: String,
    /// Per-request timeout in seconds. Absent means requests may wait
    /// indefinitely, which is the service's historical behaviour.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Prefix of exported report file names
    #[serde(default = "default_report_prefix")]
    pub report_prefix: String,
    /// Where exported reports are written; defaults to the platform
    /// download directory
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_report_prefix() -> String {
    DEFAULT_REPORT_PREFIX.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            report_prefix: default_report_prefix(),
            download_dir: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfigUpdate {
    pub backend_url: Option<String>,
    /// `Some(0)` removes the timeout.
    pub request_timeout_secs: Option<u64>,
    pub report_prefix: Option<String>,
    pub download_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: ClientConfigUpdate) {
        if let Some(url) = update.backend_url {
            self.backend_url = url;
        }
        if let Some(secs) = update.request_timeout_secs {
            self.request_timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(prefix) = update.report_prefix {
            self.report_prefix = prefix;
        }
        if let Some(dir) = update.download_dir {
            self.download_dir = Some(dir);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(self.backend_url.trim())
            .map_err(|e| format!("Invalid backend_url: '{}': {}", self.backend_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Invalid backend_url: '{}'. Must start with http:// or https://",
                self.backend_url
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(format!("Invalid backend_url: '{}'. URL has no host", self.backend_url));
        }

        if let Some(secs) = self.request_timeout_secs {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(format!(
                    "request_timeout_secs must be between 1 and {}",
                    MAX_TIMEOUT_SECS
                ));
            }
        }

        let prefix = self.report_prefix.trim();
        if prefix.is_empty() {
            return Err("report_prefix cannot be empty".to_string());
        }
        if prefix.contains(['/', '\\']) {
            return Err(format!(
                "report_prefix cannot contain path separators: '{}'",
                self.report_prefix
            ));
        }

        Ok(())
    }

    /// Connection settings for the HTTP backend.
    pub fn backend_config(&self) -> BackendConfig {
        let config = BackendConfig::new(self.backend_url.trim());
        match self.request_timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Directory exported reports are written to.
    pub fn resolve_download_dir(&self) -> AppResult<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_download_dir(),
        }
    }
}
