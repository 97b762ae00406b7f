//! Session Orchestrator
//!
//! Entry points a UI shell calls. Owns the shared session and the four
//! controllers, and evaluates the benchmark rule when a view is activated.
//! Submitting drops any previous result first, which moves the session off
//! the benchmark view, so a submit never fetches the benchmark.
//!
//! The orchestrator is cheap to clone; clones share one session, so entry
//! points can be spawned as independent tasks.

use std::path::PathBuf;
use std::sync::Arc;

use casefile_backend::AnalysisBackend;
use casefile_core::{AnalysisResult, DocumentHandle, ErrorKind, SessionGeneration, ViewSelector};
use serde::Serialize;

use super::analysis::AnalysisGateway;
use super::benchmark::BenchmarkController;
use super::download::DownloadSink;
use super::export::ReportExportController;
use super::scenario::ScenarioController;
use super::session::{shared_session, SharedSession};
use super::UNREADABLE_DOCUMENT_MESSAGE;
use crate::models::outcome::{Outcome, SessionError};
use crate::models::snapshot::DashboardSnapshot;

/// Result of a view activation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewActivation {
    /// The view active after the request.
    pub view: ViewSelector,
    /// False when the requested view was locked and the request ignored.
    pub accepted: bool,
    /// Set when the activation triggered the benchmark fetch.
    #[serde(skip)]
    pub benchmark: Option<Outcome<String>>,
}

#[derive(Clone)]
pub struct Orchestrator {
    session: SharedSession,
    gateway: Arc<AnalysisGateway>,
    scenario: Arc<ScenarioController>,
    benchmark: Arc<BenchmarkController>,
    export: Arc<ReportExportController>,
}

impl Orchestrator {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        sink: Arc<dyn DownloadSink>,
        report_prefix: impl Into<String>,
    ) -> Self {
        tracing::debug!("[Orchestrator] using {} backend", backend.name());
        Self {
            session: shared_session(),
            gateway: Arc::new(AnalysisGateway::new(Arc::clone(&backend))),
            scenario: Arc::new(ScenarioController::new(Arc::clone(&backend))),
            benchmark: Arc::new(BenchmarkController::new(Arc::clone(&backend))),
            export: Arc::new(ReportExportController::new(backend, sink).with_prefix(report_prefix)),
        }
    }

    /// Shared session handle, for shells that render from the store directly.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn report_prefix(&self) -> &str {
        self.export.prefix()
    }

    /// Replace the selected document. Any in-flight response for the previous
    /// document will be discarded when it arrives.
    pub async fn select_document(&self, document: DocumentHandle) -> SessionGeneration {
        tracing::info!("[Orchestrator] selected '{}'", document.name());
        self.session.write().await.select_document(document)
    }

    /// Select a file on disk. Its content is read when it is submitted.
    pub async fn select_file(
        &self,
        path: impl Into<PathBuf>,
    ) -> Result<SessionGeneration, SessionError> {
        match DocumentHandle::from_path(path) {
            Ok(document) => Ok(self.select_document(document).await),
            Err(e) => {
                tracing::warn!("[Orchestrator] cannot use selected file: {}", e);
                let error =
                    SessionError::new(ErrorKind::DocumentError, UNREADABLE_DOCUMENT_MESSAGE);
                self.session.write().await.set_error(error.clone());
                Err(error)
            }
        }
    }

    /// Submit the selected document for analysis.
    pub async fn submit(&self) -> Outcome<Arc<AnalysisResult>> {
        self.gateway.submit(&self.session).await
    }

    /// Activate `view`. Locked views are ignored; activating the benchmark
    /// view may start its one-time fetch, which is awaited here.
    pub async fn activate_view(&self, view: ViewSelector) -> ViewActivation {
        let (accepted, active) = {
            let mut store = self.session.write().await;
            let accepted = store.select_view(view);
            (accepted, store.active_view())
        };
        if !accepted {
            tracing::debug!("[Orchestrator] view '{}' is locked", view);
            return ViewActivation {
                view: active,
                accepted,
                benchmark: None,
            };
        }

        let benchmark = self.benchmark.fetch_once(&self.session).await;
        ViewActivation {
            view: active,
            accepted,
            benchmark,
        }
    }

    /// Activate the view named by a dashboard `?tab=` value. Unknown values
    /// return `None` and change nothing.
    pub async fn activate_view_from_link(&self, tab: &str) -> Option<ViewActivation> {
        let view = ViewSelector::from_tab(tab)?;
        Some(self.activate_view(view).await)
    }

    pub async fn ask(&self, query: &str) -> Outcome<String> {
        self.scenario.ask(&self.session, query).await
    }

    pub async fn export_report(&self) -> Outcome<PathBuf> {
        self.export.export_report(&self.session).await
    }

    /// Drop the document and everything derived from it.
    pub async fn reset(&self) -> SessionGeneration {
        tracing::info!("[Orchestrator] session reset");
        self.session.write().await.reset()
    }

    pub async fn clear_error(&self) {
        self.session.write().await.clear_error();
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.session.read().await.snapshot()
    }
}
