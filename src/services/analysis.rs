//! Remote Analysis Gateway
//!
//! Submits the selected document to the analysis service and settles the
//! response into the session.

use std::sync::Arc;

use casefile_backend::AnalysisBackend;
use casefile_core::AnalysisResult;

use super::session::SharedSession;
use super::session_failure;
use crate::models::outcome::{Outcome, Rejection, SessionError, Settlement};

/// Shown when submit is pressed without a selected document.
pub const NO_DOCUMENT_MESSAGE: &str = "Please select a file first.";
/// Shown when the analysis request fails.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "An error occurred during analysis. Check the backend console.";

pub struct AnalysisGateway {
    backend: Arc<dyn AnalysisBackend>,
}

impl AnalysisGateway {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Submit the session's current document for analysis.
    ///
    /// On success the result replaces any previous one and the scenario and
    /// benchmark sub-states start empty. On failure the document stays
    /// selected so the user can retry.
    pub async fn submit(&self, session: &SharedSession) -> Outcome<Arc<AnalysisResult>> {
        let ticket = {
            let mut store = session.write().await;
            match store.begin_submit() {
                Ok(ticket) => ticket,
                Err(Rejection::NoDocument) => {
                    store.set_error(SessionError::validation(NO_DOCUMENT_MESSAGE));
                    return Outcome::Rejected(Rejection::NoDocument);
                }
                Err(reason) => return Outcome::Rejected(reason),
            }
        };

        tracing::info!(
            "[Gateway] submitting '{}' to {} backend ({})",
            ticket.document.name(),
            self.backend.name(),
            ticket.generation
        );

        let response = self.backend.analyze(&ticket.document).await;
        let response = response.map_err(|e| {
            tracing::warn!("[Gateway] analysis of '{}' failed: {}", ticket.document.name(), e);
            session_failure(&e, ANALYSIS_FAILED_MESSAGE)
        });

        let mut store = session.write().await;
        match store.complete_submit(ticket.generation, response) {
            Settlement::Applied => match store.result() {
                Some(result) => {
                    tracing::info!("[Gateway] analysis applied for '{}'", result.company_name);
                    Outcome::Applied(Arc::clone(result))
                }
                None => Outcome::Discarded,
            },
            Settlement::Failed(error) => Outcome::Failed(error),
            Settlement::Stale => {
                tracing::debug!("[Gateway] discarding stale response ({})", ticket.generation);
                Outcome::Discarded
            }
        }
    }
}
