//! Casefile Core
//!
//! Foundational domain types for the Casefile client workspace: the selected
//! document, the analysis result, scenario transcript, view selector and the
//! unlock policy, plus core error types. No I/O and no network code lives
//! here.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`) and `ErrorKind`
//! - `model` - `DocumentHandle`, `AnalysisResult`, `SessionGeneration`
//! - `transcript` - Scenario turns and the id-addressed `Transcript`
//! - `view` - `ViewSelector`, `reachable`, navigation affordances

pub mod error;
pub mod model;
pub mod transcript;
pub mod view;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult, ErrorKind};

// ── Data Model ─────────────────────────────────────────────────────────
pub use model::{media_type_for, AnalysisResult, DocumentContent, DocumentHandle, SessionGeneration};

// ── Scenario Transcript ────────────────────────────────────────────────
pub use transcript::{ScenarioTurn, Transcript, TurnId, PENDING_REPLY};

// ── Views ──────────────────────────────────────────────────────────────
pub use view::{nav_items, reachable, NavItem, ViewSelector, DASHBOARD_TABS};
