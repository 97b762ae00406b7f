//! Benchmark Controller
//!
//! Fetches the sector comparison for the current result, at most once per
//! result. Whether a fetch is due is decided by the session store; this
//! controller only runs it.

use std::sync::Arc;

use casefile_backend::{AnalysisBackend, BenchmarkRequest};

use super::session::SharedSession;
use super::session_failure;
use crate::models::outcome::Outcome;

/// Shown when the benchmark request fails.
pub const BENCHMARK_FAILED_MESSAGE: &str =
    "An error occurred during benchmark analysis. Check the backend console.";

pub struct BenchmarkController {
    backend: Arc<dyn AnalysisBackend>,
}

impl BenchmarkController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Run the benchmark fetch if one is due. `None` means nothing was
    /// requested: the view is not active, there is no result, or this result
    /// already had its attempt.
    pub async fn fetch_once(&self, session: &SharedSession) -> Option<Outcome<String>> {
        let ticket = session.write().await.begin_benchmark()?;

        tracing::info!(
            "[Benchmark] fetching sector comparison for '{}' ({})",
            ticket.result.company_name,
            ticket.generation
        );

        let request = BenchmarkRequest::new(&ticket.result);
        let response = self.backend.benchmark(&request).await.map_err(|e| {
            tracing::warn!("[Benchmark] fetch failed: {}", e);
            session_failure(&e, BENCHMARK_FAILED_MESSAGE)
        });

        let mut store = session.write().await;
        let outcome = match response {
            Ok(text) => {
                let settlement = store.complete_benchmark(ticket.generation, Ok(text.clone()));
                Outcome::from_settlement(settlement, text)
            }
            Err(error) => {
                let settlement = store.complete_benchmark(ticket.generation, Err(error));
                Outcome::from_settlement(settlement, String::new())
            }
        };
        Some(outcome)
    }
}
