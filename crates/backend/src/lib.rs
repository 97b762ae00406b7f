//! Casefile Backend
//!
//! Client side of the remote analysis service:
//! - `AnalysisBackend` - the trait the session orchestration talks to
//! - `HttpAnalysisBackend` - reqwest implementation of the service's HTTP API
//! - Wire types (`ScenarioRequest`, `BenchmarkRequest`, `ReportRequest`) and
//!   `BackendError`
//!
//! Also includes the HTTP client factory and document content loading.

pub mod backend;
pub mod document;
pub mod http;
pub mod http_client;
pub mod types;

// Re-export main types
pub use backend::{parse_http_error, AnalysisBackend};
pub use document::read_document;
pub use http::HttpAnalysisBackend;
pub use http_client::build_http_client;
pub use types::*;
