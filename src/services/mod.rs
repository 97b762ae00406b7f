//! Services
//!
//! Session orchestration: the session store, one controller per remote
//! operation, report delivery, and the orchestrator that ties them together.

pub mod analysis;
pub mod benchmark;
pub mod download;
pub mod export;
pub mod orchestrator;
pub mod scenario;
pub mod session;


pub use analysis::AnalysisGateway;
pub use benchmark::BenchmarkController;
pub use download::{DownloadSink, FileDownloadSink, StagedReport};
pub use export::{report_file_name, ReportExportController};
pub use orchestrator::{Orchestrator, ViewActivation};
pub use scenario::ScenarioController;
pub use session::{shared_session, SessionStore, SharedSession};

use casefile_backend::BackendError;
use casefile_core::ErrorKind;

use crate::models::outcome::SessionError;

/// Shown when the selected document cannot be read.
pub const UNREADABLE_DOCUMENT_MESSAGE: &str = "Could not read the selected file.";

/// Error-slot entry for a failed backend call. The detailed cause is only
/// logged; the user sees the operation's fixed message.
pub(crate) fn session_failure(error: &BackendError, message: &str) -> SessionError {
    match error.kind() {
        ErrorKind::DocumentError => {
            SessionError::new(ErrorKind::DocumentError, UNREADABLE_DOCUMENT_MESSAGE)
        }
        kind => SessionError::new(kind, message),
    }
}
