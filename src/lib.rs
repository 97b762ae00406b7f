//! Casefile Client - Session Orchestration Library
//!
//! Client side of a financial document analysis service. A user selects a
//! filing or spreadsheet, submits it for analysis, then explores the result
//! through scenario questions, a sector benchmark and a downloadable report.
//! It includes:
//! - The session store and its generation-tagged transitions
//! - One controller per remote operation, plus the orchestrator a UI shell calls
//! - Configuration storage and report delivery
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::outcome::{Outcome, Rejection, SessionError, Settlement};
pub use models::settings::{ClientConfig, ClientConfigUpdate};
pub use models::snapshot::DashboardSnapshot;
pub use services::{
    report_file_name, DownloadSink, FileDownloadSink, Orchestrator, SessionStore, SharedSession,
    StagedReport, ViewActivation,
};
pub use state::AppState;
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
