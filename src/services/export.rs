//! Report Export Controller
//!
//! Renders the detailed report for the current result and delivers it
//! through a [`DownloadSink`].

use std::path::PathBuf;
use std::sync::Arc;

use casefile_backend::{AnalysisBackend, ReportRequest};
use casefile_core::ErrorKind;

use super::download::DownloadSink;
use super::session::SharedSession;
use super::session_failure;
use crate::models::outcome::{Outcome, SessionError, Settlement};
use crate::models::settings::DEFAULT_REPORT_PREFIX;
use crate::utils::error::AppError;

/// Shown when rendering or saving the report fails.
pub const EXPORT_FAILED_MESSAGE: &str =
    "An error occurred during download. Check the backend console.";

/// File name of an exported report: `<prefix>_<original-name>.docx`.
pub fn report_file_name(prefix: &str, document_name: &str) -> String {
    format!("{}_{}.docx", prefix, document_name)
}

pub struct ReportExportController {
    backend: Arc<dyn AnalysisBackend>,
    sink: Arc<dyn DownloadSink>,
    prefix: String,
}

impl ReportExportController {
    pub fn new(backend: Arc<dyn AnalysisBackend>, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            backend,
            sink,
            prefix: DEFAULT_REPORT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render and deliver the report. Returns the delivered location.
    ///
    /// A report whose session was superseded before it could be published
    /// is not delivered, even if the change lands while the file is being
    /// written.
    pub async fn export_report(&self, session: &SharedSession) -> Outcome<PathBuf> {
        let ticket = match session.write().await.begin_export() {
            Ok(ticket) => ticket,
            Err(reason) => return Outcome::Rejected(reason),
        };

        let file_name = report_file_name(&self.prefix, &ticket.document_name);
        tracing::info!("[Export] rendering '{}' ({})", file_name, ticket.generation);

        let request = ReportRequest::new(&ticket.result, ticket.document_name.as_str());
        let artifact = match self.backend.render_report(&request).await {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!("[Export] report rendering failed: {}", e);
                let failure = session_failure(&e, EXPORT_FAILED_MESSAGE);
                let settlement = session
                    .write()
                    .await
                    .finish_export(ticket.generation, Err(failure));
                return Outcome::from_settlement(settlement, PathBuf::new());
            }
        };

        if !session.read().await.is_current(ticket.generation) {
            tracing::debug!("[Export] session moved on, dropping report ({})", ticket.generation);
            session.write().await.finish_export(ticket.generation, Ok(()));
            return Outcome::Discarded;
        }

        let sink = Arc::clone(&self.sink);
        let staged = tokio::task::spawn_blocking(move || sink.stage(&file_name, &artifact))
            .await
            .map_err(|e| AppError::internal(format!("report delivery task failed: {}", e)))
            .and_then(|staged| staged);

        // Publish under the write lock so no transition can slip in between
        // the generation check and the commit.
        let mut store = session.write().await;
        let delivery = match staged {
            Ok(staged) if store.is_current(ticket.generation) => staged.commit(),
            Ok(_) => {
                tracing::debug!(
                    "[Export] session moved on while saving, dropping report ({})",
                    ticket.generation
                );
                store.finish_export(ticket.generation, Ok(()));
                return Outcome::Discarded;
            }
            Err(e) => Err(e),
        };

        match delivery {
            Ok(path) => match store.finish_export(ticket.generation, Ok(())) {
                Settlement::Applied => {
                    tracing::info!("[Export] report saved to {}", path.display());
                    Outcome::Applied(path)
                }
                Settlement::Failed(error) => Outcome::Failed(error),
                Settlement::Stale => Outcome::Discarded,
            },
            Err(e) => {
                tracing::warn!("[Export] saving report failed: {}", e);
                let failure = SessionError::new(ErrorKind::DocumentError, EXPORT_FAILED_MESSAGE);
                let settlement = store.finish_export(ticket.generation, Err(failure));
                Outcome::from_settlement(settlement, PathBuf::new())
            }
        }
    }
}
