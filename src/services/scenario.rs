//! Scenario Chat Controller
//!
//! What-if questions against the current analysis. The question is appended
//! to the transcript as a pending turn before the request is sent and is
//! settled by turn id when the reply arrives.

use std::sync::Arc;

use casefile_backend::{AnalysisBackend, ScenarioRequest};

use super::session::SharedSession;
use super::session_failure;
use crate::models::outcome::Outcome;

/// Shown when a scenario request fails.
pub const SCENARIO_FAILED_MESSAGE: &str =
    "An error occurred during simulation. Check the backend console.";

pub struct ScenarioController {
    backend: Arc<dyn AnalysisBackend>,
}

impl ScenarioController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Ask `query` against the current result. Returns the reply text when
    /// it was applied to the transcript.
    pub async fn ask(&self, session: &SharedSession, query: &str) -> Outcome<String> {
        let ticket = match session.write().await.begin_ask(query) {
            Ok(ticket) => ticket,
            Err(reason) => {
                tracing::debug!("[Scenario] ask rejected: {}", reason.as_str());
                return Outcome::Rejected(reason);
            }
        };

        tracing::info!(
            "[Scenario] asking about '{}' (turn {}, {})",
            ticket.result.company_name,
            ticket.turn_id.value(),
            ticket.generation
        );

        let request = ScenarioRequest::new(&ticket.result, ticket.query.as_str());
        let response = self.backend.ask_scenario(&request).await.map_err(|e| {
            tracing::warn!("[Scenario] turn {} failed: {}", ticket.turn_id.value(), e);
            session_failure(&e, SCENARIO_FAILED_MESSAGE)
        });

        let mut store = session.write().await;
        match response {
            Ok(reply) => {
                let settlement =
                    store.resolve_turn(ticket.generation, ticket.turn_id, Ok(reply.clone()));
                Outcome::from_settlement(settlement, reply)
            }
            Err(error) => {
                let settlement = store.resolve_turn(ticket.generation, ticket.turn_id, Err(error));
                Outcome::from_settlement(settlement, String::new())
            }
        }
    }
}
