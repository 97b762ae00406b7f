//! Dashboard Snapshot
//!
//! Read-only view of the session that a UI shell renders from.

use std::sync::Arc;

use casefile_core::{AnalysisResult, NavItem, ScenarioTurn, SessionGeneration, ViewSelector};
use serde::Serialize;

use super::outcome::SessionError;

/// Everything needed to render the dashboard at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generation: SessionGeneration,
    pub active_view: ViewSelector,
    /// Dashboard tabs with their enabled/active state.
    pub nav: Vec<NavItem>,
    pub document_name: Option<String>,
    pub result: Option<Arc<AnalysisResult>>,
    pub transcript: Vec<ScenarioTurn>,
    pub benchmark: Option<String>,
    pub error: Option<SessionError>,
    pub analyzing: bool,
    pub asking: bool,
    pub benchmarking: bool,
    pub exporting: bool,
}

impl DashboardSnapshot {
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// The analyze trigger is disabled while an analysis or export is running.
    pub fn can_submit(&self) -> bool {
        !self.analyzing && !self.exporting
    }

    /// The scenario input is disabled while a turn is pending.
    pub fn can_ask(&self) -> bool {
        self.has_result() && !self.asking
    }

    /// The download trigger is shown for a settled result and disabled while
    /// an export is pending.
    pub fn can_export(&self) -> bool {
        self.has_result() && !self.analyzing && !self.exporting
    }
}
