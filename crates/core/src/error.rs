//! Core Error Types
//!
//! Defines the foundational error types and the user-facing error taxonomy
//! shared across the Casefile workspace. Dependency-free apart from thiserror
//! and serde so the core crate stays lightweight.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error type for the Casefile workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (rejected before any request is issued)
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}

/// Classification of a failure surfaced in the session's error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure, including client-side timeouts.
    NetworkError,
    /// Non-success response status or an undecodable response body.
    ServerError,
    /// Input rejected locally; never reaches the network layer.
    ValidationError,
    /// The selected document could not be read.
    DocumentError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "network_error",
            ErrorKind::ServerError => "server_error",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::DocumentError => "document_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
