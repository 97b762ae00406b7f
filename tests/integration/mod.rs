//! Integration Tests Module
//!
//! Session orchestration tests. The flow tests drive the orchestrator
//! against a gated in-process backend so that response ordering is under
//! test control; the HTTP tests run the full stack against a local stub of
//! the analysis service.


// Stale-response, busy-flag and sub-state reset behaviour
mod session_flow_test;

// View unlock policy and deep links
mod navigation_test;
