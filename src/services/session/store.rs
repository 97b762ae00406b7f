//! Session State Store
//!
//! Single source of truth for one analysis session. All mutation goes through
//! the named transitions below. Operations that await the network are split
//! into a `begin_*` transition, which validates, raises the busy flag and
//! captures the current generation in a ticket, and a completion transition
//! that applies the response only if that generation is still current.
//!
//! Busy flags are released by the completion that owns them even when the
//! response itself is stale, so a superseded request can never leave the
//! session stuck in a loading state.

use std::sync::Arc;

use casefile_core::{
    nav_items, reachable, AnalysisResult, DocumentHandle, SessionGeneration, Transcript, TurnId,
    ViewSelector,
};

use crate::models::outcome::{Rejection, SessionError, Settlement};
use crate::models::snapshot::DashboardSnapshot;

/// Issued by `begin_submit`; identifies one primary analysis request.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub generation: SessionGeneration,
    pub document: DocumentHandle,
}

/// Issued by `begin_ask`; identifies one scenario turn.
#[derive(Debug, Clone)]
pub struct AskTicket {
    pub generation: SessionGeneration,
    pub turn_id: TurnId,
    pub query: String,
    pub result: Arc<AnalysisResult>,
}

/// Issued by `begin_benchmark`.
#[derive(Debug, Clone)]
pub struct BenchmarkTicket {
    pub generation: SessionGeneration,
    pub result: Arc<AnalysisResult>,
}

/// Issued by `begin_export`.
#[derive(Debug, Clone)]
pub struct ExportTicket {
    pub generation: SessionGeneration,
    pub result: Arc<AnalysisResult>,
    pub document_name: String,
}

/// Benchmark sub-state, scoped to one analysis result.
#[derive(Debug, Clone, Default)]
struct BenchmarkState {
    text: Option<String>,
    /// Generation that already had its one automatic attempt.
    attempted: Option<SessionGeneration>,
    in_flight: Option<SessionGeneration>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    generation: SessionGeneration,
    document: Option<DocumentHandle>,
    result: Option<Arc<AnalysisResult>>,
    active_view: ViewSelector,
    error: Option<SessionError>,
    transcript: Transcript,
    benchmark: BenchmarkState,
    /// Generation of the in-flight primary analysis, if any.
    analyzing: Option<SessionGeneration>,
    exporting: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }

    pub fn is_current(&self, generation: SessionGeneration) -> bool {
        self.generation == generation
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.document.as_ref()
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.result.as_ref()
    }

    pub fn active_view(&self) -> ViewSelector {
        self.active_view
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn benchmark_text(&self) -> Option<&str> {
        self.benchmark.text.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_some()
    }

    pub fn is_benchmarking(&self) -> bool {
        self.benchmark.in_flight.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let has_result = self.result.is_some();
        DashboardSnapshot {
            generation: self.generation,
            active_view: self.active_view,
            nav: nav_items(self.active_view, has_result),
            document_name: self.document.as_ref().map(|d| d.name().to_string()),
            result: self.result.clone(),
            transcript: self.transcript.turns().to_vec(),
            benchmark: self.benchmark.text.clone(),
            error: self.error.clone(),
            analyzing: self.is_analyzing(),
            asking: self.transcript.has_pending(),
            benchmarking: self.is_benchmarking(),
            exporting: self.exporting,
        }
    }

    // ── Error slot ─────────────────────────────────────────────────────

    pub fn set_error(&mut self, error: SessionError) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ── Document & navigation ──────────────────────────────────────────

    /// Replace the selected document. Any result and its dependent state
    /// belong to the previous document and are dropped.
    pub fn select_document(&mut self, document: DocumentHandle) -> SessionGeneration {
        self.generation = self.generation.next();
        self.document = Some(document);
        self.invalidate_result();
        self.error = None;
        self.generation
    }

    /// Activate `view` if the unlock policy allows it. Returns whether the
    /// view changed hands; unreachable views are ignored.
    pub fn select_view(&mut self, view: ViewSelector) -> bool {
        if !reachable(view, self.result.is_some()) {
            return false;
        }
        self.active_view = view;
        true
    }

    /// Drop the document, result and all dependent state.
    pub fn reset(&mut self) -> SessionGeneration {
        self.generation = self.generation.next();
        self.document = None;
        self.invalidate_result();
        self.error = None;
        self.active_view = ViewSelector::Analysis;
        self.generation
    }

    fn invalidate_result(&mut self) {
        self.result = None;
        self.transcript.clear();
        self.benchmark = BenchmarkState::default();
        if !reachable(self.active_view, false) {
            self.active_view = ViewSelector::Analysis;
        }
    }

    // ── Primary analysis ───────────────────────────────────────────────

    pub fn begin_submit(&mut self) -> Result<SubmitTicket, Rejection> {
        if self.analyzing.is_some() || self.exporting {
            return Err(Rejection::Busy);
        }
        let document = self.document.clone().ok_or(Rejection::NoDocument)?;

        self.generation = self.generation.next();
        self.invalidate_result();
        self.error = None;
        self.analyzing = Some(self.generation);
        Ok(SubmitTicket {
            generation: self.generation,
            document,
        })
    }

    pub fn complete_submit(
        &mut self,
        generation: SessionGeneration,
        outcome: Result<AnalysisResult, SessionError>,
    ) -> Settlement {
        if self.analyzing == Some(generation) {
            self.analyzing = None;
        }
        if !self.is_current(generation) {
            return Settlement::Stale;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(Arc::new(result));
                self.transcript.clear();
                self.benchmark = BenchmarkState::default();
                Settlement::Applied
            }
            Err(error) => {
                self.error = Some(error.clone());
                Settlement::Failed(error)
            }
        }
    }

    // ── Scenario chat ──────────────────────────────────────────────────

    /// Validate the query and optimistically append a pending turn.
    pub fn begin_ask(&mut self, query: &str) -> Result<AskTicket, Rejection> {
        if query.trim().is_empty() {
            return Err(Rejection::EmptyQuery);
        }
        let result = self.result.clone().ok_or(Rejection::Locked)?;
        if self.transcript.has_pending() {
            return Err(Rejection::Busy);
        }

        self.error = None;
        let turn_id = self.transcript.push_pending(query);
        Ok(AskTicket {
            generation: self.generation,
            turn_id,
            query: query.to_string(),
            result,
        })
    }

    /// Settle the turn with `turn_id`: resolve it on success, roll back the
    /// optimistic append on failure.
    pub fn resolve_turn(
        &mut self,
        generation: SessionGeneration,
        turn_id: TurnId,
        outcome: Result<String, SessionError>,
    ) -> Settlement {
        if !self.is_current(generation) {
            return Settlement::Stale;
        }
        match outcome {
            Ok(reply) => {
                if self.transcript.resolve(turn_id, reply) {
                    Settlement::Applied
                } else {
                    Settlement::Stale
                }
            }
            Err(error) => {
                self.transcript.discard(turn_id);
                self.error = Some(error.clone());
                Settlement::Failed(error)
            }
        }
    }

    // ── Benchmark ──────────────────────────────────────────────────────

    /// Reactive benchmark rule: fetch when the benchmark view is active and
    /// the current result has not had its attempt yet. Returns `None` when
    /// no fetch is due.
    pub fn begin_benchmark(&mut self) -> Option<BenchmarkTicket> {
        if self.active_view != ViewSelector::Benchmark {
            return None;
        }
        let result = self.result.clone()?;
        if self.benchmark.text.is_some() || self.benchmark.attempted == Some(self.generation) {
            return None;
        }

        self.error = None;
        self.benchmark.attempted = Some(self.generation);
        self.benchmark.in_flight = Some(self.generation);
        Some(BenchmarkTicket {
            generation: self.generation,
            result,
        })
    }

    pub fn complete_benchmark(
        &mut self,
        generation: SessionGeneration,
        outcome: Result<String, SessionError>,
    ) -> Settlement {
        if self.benchmark.in_flight == Some(generation) {
            self.benchmark.in_flight = None;
        }
        if !self.is_current(generation) {
            return Settlement::Stale;
        }
        match outcome {
            Ok(text) => {
                self.benchmark.text = Some(text);
                Settlement::Applied
            }
            Err(error) => {
                self.error = Some(error.clone());
                Settlement::Failed(error)
            }
        }
    }

    // ── Report export ──────────────────────────────────────────────────

    pub fn begin_export(&mut self) -> Result<ExportTicket, Rejection> {
        let result = self.result.clone().ok_or(Rejection::Locked)?;
        let document_name = self
            .document
            .as_ref()
            .map(|d| d.name().to_string())
            .ok_or(Rejection::Locked)?;
        if self.exporting {
            return Err(Rejection::Busy);
        }

        self.exporting = true;
        self.error = None;
        Ok(ExportTicket {
            generation: self.generation,
            result,
            document_name,
        })
    }

    /// Always clears the exporting flag; only one export runs at a time.
    pub fn finish_export(
        &mut self,
        generation: SessionGeneration,
        outcome: Result<(), SessionError>,
    ) -> Settlement {
        self.exporting = false;
        if !self.is_current(generation) {
            return Settlement::Stale;
        }
        match outcome {
            Ok(()) => Settlement::Applied,
            Err(error) => {
                self.error = Some(error.clone());
                Settlement::Failed(error)
            }
        }
    }
}
