//! Backend Types
//!
//! Wire payloads exchanged with the analysis service, the client
//! configuration, and the error type every backend call returns.

use std::time::Duration;

use bytes::Bytes;
use casefile_core::{AnalysisResult, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default analysis service base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

// ============================================================================
// Errors
// ============================================================================

/// Errors returned by an [`AnalysisBackend`](crate::AnalysisBackend).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Transport failure: connection refused, reset, DNS, timeout.
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// The service answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    ServerError { message: String, status: u16 },

    /// The service answered successfully but the body could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The selected document could not be read or described.
    #[error("Document error: {message}")]
    DocumentError { message: String },

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Error-slot classification for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::NetworkError { .. } => ErrorKind::NetworkError,
            BackendError::ServerError { .. } | BackendError::InvalidResponse { .. } => {
                ErrorKind::ServerError
            }
            BackendError::DocumentError { .. } => ErrorKind::DocumentError,
            BackendError::Config { .. } => ErrorKind::ValidationError,
        }
    }

    /// Convert a reqwest transport error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        BackendError::NetworkError { message }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Connection settings for the HTTP backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Service base URL, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Body of a what-if scenario question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub analysis_context: Value,
    pub user_query: String,
    pub company_name: String,
    pub cleaned_data: Value,
}

impl ScenarioRequest {
    pub fn new(result: &AnalysisResult, user_query: impl Into<String>) -> Self {
        Self {
            analysis_context: result.analysis_context.clone(),
            user_query: user_query.into(),
            company_name: result.company_name.clone(),
            cleaned_data: result.cleaned_data.clone(),
        }
    }
}

/// Body of a market benchmark request. Stateless apart from the base analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    pub company_name: String,
    pub cleaned_data: Value,
}

impl BenchmarkRequest {
    pub fn new(result: &AnalysisResult) -> Self {
        Self {
            company_name: result.company_name.clone(),
            cleaned_data: result.cleaned_data.clone(),
        }
    }
}

/// Body of a report rendering request: the whole result plus the original
/// document's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub filename: String,
}

impl ReportRequest {
    pub fn new(result: &AnalysisResult, filename: impl Into<String>) -> Self {
        Self {
            result: result.clone(),
            filename: filename.into(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `{ "response": "..." }` returned by the scenario and benchmark endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    pub response: String,
}

/// Binary document produced by the report endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl ReportArtifact {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
