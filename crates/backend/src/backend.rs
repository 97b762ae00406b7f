//! Analysis Backend Trait
//!
//! Defines the boundary between the client orchestration and the remote
//! analysis service. The service itself (document parsing, multi-persona
//! debate, scenario reasoning, benchmarking) is opaque here.

use async_trait::async_trait;
use casefile_core::{AnalysisResult, DocumentHandle};

use super::types::{
    BackendError, BackendResult, BenchmarkRequest, ReportArtifact, ReportRequest, ScenarioRequest,
};

/// Trait every analysis service client implements.
///
/// Each call is a single request/response exchange. Implementations never
/// retry; retrying is a fresh user action.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Upload a document and run the full analysis pipeline.
    ///
    /// This is the slow call (tens of seconds is normal).
    async fn analyze(&self, document: &DocumentHandle) -> BackendResult<AnalysisResult>;

    /// Ask a what-if question against an existing analysis.
    async fn ask_scenario(&self, request: &ScenarioRequest) -> BackendResult<String>;

    /// Compare the analysed company against sector averages.
    async fn benchmark(&self, request: &BenchmarkRequest) -> BackendResult<String>;

    /// Render the detailed report document.
    async fn render_report(&self, request: &ReportRequest) -> BackendResult<ReportArtifact>;
}

/// Maximum length of a response body quoted in an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Map a non-success HTTP status and body to a `BackendError`.
///
/// The service reports failures as `{"detail": "..."}`; when present the
/// detail is used as the message, otherwise the (truncated) raw body.
pub fn parse_http_error(status: u16, body: &str, endpoint: &str) -> BackendError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect());

    let message = if detail.is_empty() {
        format!("{} returned HTTP {}", endpoint, status)
    } else {
        format!("{}: {}", endpoint, detail)
    };
    BackendError::ServerError { message, status }
}
