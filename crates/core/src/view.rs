//! View Selector & Unlock Policy
//!
//! The enumerated views of the client and the rule that decides which of
//! them are reachable. `simulator` and `benchmark` depend on an analysis
//! result; everything else is always reachable.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSelector {
    #[default]
    Analysis,
    Simulator,
    Benchmark,
    Home,
    About,
}

/// Dashboard tabs in navigation order.
pub const DASHBOARD_TABS: [ViewSelector; 3] = [
    ViewSelector::Analysis,
    ViewSelector::Simulator,
    ViewSelector::Benchmark,
];

impl ViewSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewSelector::Analysis => "analysis",
            ViewSelector::Simulator => "simulator",
            ViewSelector::Benchmark => "benchmark",
            ViewSelector::Home => "home",
            ViewSelector::About => "about",
        }
    }

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewSelector::Analysis => "Analysis Dashboard",
            ViewSelector::Simulator => "Scenario Simulator",
            ViewSelector::Benchmark => "Market View",
            ViewSelector::Home => "Home",
            ViewSelector::About => "About",
        }
    }

    /// Whether this view needs an analysis result to be meaningful.
    pub fn requires_result(&self) -> bool {
        matches!(self, ViewSelector::Simulator | ViewSelector::Benchmark)
    }

    /// Parse a dashboard `?tab=` value. Only dashboard tabs are accepted.
    pub fn from_tab(tab: &str) -> Option<Self> {
        DASHBOARD_TABS
            .into_iter()
            .find(|view| view.as_str() == tab.trim())
    }
}

impl std::fmt::Display for ViewSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewSelector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analysis" => Ok(ViewSelector::Analysis),
            "simulator" => Ok(ViewSelector::Simulator),
            "benchmark" => Ok(ViewSelector::Benchmark),
            "home" => Ok(ViewSelector::Home),
            "about" => Ok(ViewSelector::About),
            other => Err(CoreError::parse(format!("Unknown view: '{}'", other))),
        }
    }
}

/// View Unlock Policy.
pub fn reachable(view: ViewSelector, has_result: bool) -> bool {
    !view.requires_result() || has_result
}

/// One navigation affordance with its disabled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub view: ViewSelector,
    pub label: String,
    pub enabled: bool,
    pub active: bool,
}

/// Navigation affordances for the dashboard tabs.
pub fn nav_items(active: ViewSelector, has_result: bool) -> Vec<NavItem> {
    DASHBOARD_TABS
        .into_iter()
        .map(|view| NavItem {
            view,
            label: view.label().to_string(),
            enabled: reachable(view, has_result),
            active: view == active,
        })
        .collect()
}
