//! HTTP Client Factory
//!
//! Builds the reqwest client shared by every request to the analysis service.

use std::time::Duration;

use crate::types::{BackendError, BackendResult};

/// Build a `reqwest::Client`.
///
/// - `Some(timeout)` -> every request is bounded by `timeout`
/// - `None` -> no client-side timeout; a hung service keeps the request open
pub fn build_http_client(timeout: Option<Duration>) -> BackendResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| BackendError::Config {
        message: format!("Failed to create HTTP client: {}", e),
    })
}
