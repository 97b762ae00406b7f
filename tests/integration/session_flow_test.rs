//! Session Flow Integration Tests
//!
//! Ordering-sensitive behaviour of the orchestrator: responses that arrive
//! after the session moved on, busy flags, and the reset of dependent state.

use casefile_client::{Outcome, Rejection};
use casefile_core::{ErrorKind, ViewSelector, PENDING_REPLY};

use crate::common::{document, harness, network_error, result_for, PREFIX};

// ============================================================================
// Primary analysis
// ============================================================================

#[tokio::test]
async fn test_late_response_for_previous_document_is_discarded() {
    let h = harness();
    h.orchestrator.select_document(document("a.pdf")).await;
    let submit_a = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.submit().await }
    });
    let parked = h.backend.analyze.next().await;
    assert_eq!(parked.label, "a.pdf");

    h.orchestrator.select_document(document("b.pdf")).await;
    parked.answer(Ok(result_for("A Corp")));

    assert_eq!(submit_a.await.unwrap(), Outcome::Discarded);
    let snapshot = h.orchestrator.snapshot().await;
    assert!(snapshot.result.is_none());
    assert!(snapshot.error.is_none());
    assert!(!snapshot.analyzing);
    assert_eq!(snapshot.document_name.as_deref(), Some("b.pdf"));

    // B can now be analysed normally.
    let submit_b = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.submit().await }
    });
    let parked = h.backend.analyze.next().await;
    assert_eq!(parked.label, "b.pdf");
    parked.answer(Ok(result_for("B Corp")));
    let applied = submit_b.await.unwrap().applied().unwrap();
    assert_eq!(applied.company_name, "B Corp");
}

#[tokio::test]
async fn test_late_failure_for_previous_document_leaves_error_slot_empty() {
    let h = harness();
    h.orchestrator.select_document(document("a.pdf")).await;
    let submit = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.submit().await }
    });
    let parked = h.backend.analyze.next().await;
    h.orchestrator.select_document(document("b.pdf")).await;
    parked.answer(Err(network_error()));

    assert_eq!(submit.await.unwrap(), Outcome::Discarded);
    assert!(h.orchestrator.snapshot().await.error.is_none());
}

#[tokio::test]
async fn test_submit_without_document_issues_no_request() {
    let h = harness();
    assert_eq!(
        h.orchestrator.submit().await,
        Outcome::Rejected(Rejection::NoDocument)
    );
    assert_eq!(h.backend.analyze.calls(), 0);

    let error = h.orchestrator.snapshot().await.error.unwrap();
    assert_eq!(error.kind, ErrorKind::ValidationError);
    assert_eq!(error.message, "Please select a file first.");
}

#[tokio::test]
async fn test_second_submit_while_analyzing_is_rejected() {
    let h = harness();
    h.orchestrator.select_document(document("a.pdf")).await;
    let submit = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.submit().await }
    });
    let parked = h.backend.analyze.next().await;

    let snapshot = h.orchestrator.snapshot().await;
    assert!(snapshot.analyzing);
    assert!(!snapshot.can_submit());
    assert_eq!(
        h.orchestrator.submit().await,
        Outcome::Rejected(Rejection::Busy)
    );

    parked.answer(Ok(result_for("Acme")));
    assert!(submit.await.unwrap().is_applied());
    assert_eq!(h.backend.analyze.calls(), 1);
}

#[tokio::test]
async fn test_failed_submit_sets_message_and_keeps_document() {
    let h = harness();
    h.orchestrator.select_document(document("a.pdf")).await;
    let submit = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.submit().await }
    });
    h.backend.analyze.next().await.answer(Err(network_error()));

    let outcome = submit.await.unwrap();
    assert!(matches!(outcome, Outcome::Failed(ref e) if e.kind == ErrorKind::NetworkError));
    let snapshot = h.orchestrator.snapshot().await;
    assert_eq!(
        snapshot.error.as_ref().unwrap().message,
        "An error occurred during analysis. Check the backend console."
    );
    assert_eq!(snapshot.document_name.as_deref(), Some("a.pdf"));
    assert!(!snapshot.analyzing);
}

#[tokio::test]
async fn test_resubmission_starts_with_fresh_sub_state() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;

    // Populate both dependent sub-states.
    let bench = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.activate_view(ViewSelector::Benchmark).await }
    });
    h.backend.benchmark.next().await.answer(Ok("Above sector.".into()));
    bench.await.unwrap();
    let ask = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.ask("What if rates rise?").await }
    });
    h.backend.scenario.next().await.answer(Ok("Debt costs rise.".into()));
    ask.await.unwrap();

    let snapshot = h.orchestrator.snapshot().await;
    assert_eq!(snapshot.benchmark.as_deref(), Some("Above sector."));
    assert_eq!(snapshot.transcript.len(), 1);

    h.analyse("report.pdf", "Acme").await;
    let snapshot = h.orchestrator.snapshot().await;
    assert!(snapshot.has_result());
    assert!(snapshot.benchmark.is_none());
    assert!(snapshot.transcript.is_empty());
    assert_eq!(snapshot.active_view, ViewSelector::Analysis);
}

// ============================================================================
// Scenario chat
// ============================================================================

#[tokio::test]
async fn test_pending_turn_is_visible_while_waiting() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let ask = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.ask("What if sales halve?").await }
    });
    let parked = h.backend.scenario.next().await;
    assert_eq!(parked.label, "What if sales halve?");

    let snapshot = h.orchestrator.snapshot().await;
    assert!(snapshot.asking);
    assert!(!snapshot.can_ask());
    assert_eq!(snapshot.transcript[0].reply_text(), PENDING_REPLY);
    assert_eq!(
        h.orchestrator.ask("another").await,
        Outcome::Rejected(Rejection::Busy)
    );

    parked.answer(Ok("Losses follow.".into()));
    assert_eq!(ask.await.unwrap(), Outcome::Applied("Losses follow.".into()));
    let snapshot = h.orchestrator.snapshot().await;
    assert_eq!(snapshot.transcript.len(), 1);
    assert_eq!(snapshot.transcript[0].reply_text(), "Losses follow.");
}

#[tokio::test]
async fn test_failed_ask_leaves_transcript_length_unchanged() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let ask = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.ask("first").await }
    });
    h.backend.scenario.next().await.answer(Ok("ok".into()));
    ask.await.unwrap();
    let before = h.orchestrator.snapshot().await.transcript.len();

    let ask = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.ask("second").await }
    });
    h.backend.scenario.next().await.answer(Err(network_error()));
    assert!(matches!(ask.await.unwrap(), Outcome::Failed(_)));

    let snapshot = h.orchestrator.snapshot().await;
    assert_eq!(snapshot.transcript.len(), before);
    assert_eq!(
        snapshot.error.as_ref().unwrap().message,
        "An error occurred during simulation. Check the backend console."
    );
    assert!(snapshot.can_ask());
}

#[tokio::test]
async fn test_late_reply_after_new_analysis_is_discarded() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let ask = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.ask("What if?").await }
    });
    let parked = h.backend.scenario.next().await;

    h.orchestrator.select_document(document("other.pdf")).await;
    parked.answer(Ok("stale".into()));

    assert_eq!(ask.await.unwrap(), Outcome::Discarded);
    assert!(h.orchestrator.snapshot().await.transcript.is_empty());
}

#[tokio::test]
async fn test_ask_without_result_is_rejected() {
    let h = harness();
    assert_eq!(
        h.orchestrator.ask("What if?").await,
        Outcome::Rejected(Rejection::Locked)
    );
    assert_eq!(h.backend.scenario.calls(), 0);
}

// ============================================================================
// Benchmark
// ============================================================================

#[tokio::test]
async fn test_benchmark_fetched_at_most_once_per_result() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;

    let first = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.activate_view(ViewSelector::Benchmark).await }
    });
    let parked = h.backend.benchmark.next().await;
    assert_eq!(parked.label, "Acme");
    assert!(h.orchestrator.snapshot().await.benchmarking);

    // Re-activating while the fetch is in flight does not start another.
    let again = h.orchestrator.activate_view(ViewSelector::Benchmark).await;
    assert!(again.accepted);
    assert!(again.benchmark.is_none());

    parked.answer(Ok("Margins above sector median.".into()));
    let first = first.await.unwrap();
    assert_eq!(
        first.benchmark,
        Some(Outcome::Applied("Margins above sector median.".into()))
    );

    h.orchestrator.activate_view(ViewSelector::Analysis).await;
    let later = h.orchestrator.activate_view(ViewSelector::Benchmark).await;
    assert!(later.benchmark.is_none());
    assert_eq!(h.backend.benchmark.calls(), 1);
}

#[tokio::test]
async fn test_failed_benchmark_is_not_retried_for_same_result() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;

    let first = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.activate_view(ViewSelector::Benchmark).await }
    });
    h.backend.benchmark.next().await.answer(Err(network_error()));
    assert!(matches!(first.await.unwrap().benchmark, Some(Outcome::Failed(_))));

    let snapshot = h.orchestrator.snapshot().await;
    assert!(snapshot.benchmark.is_none());
    assert_eq!(
        snapshot.error.as_ref().unwrap().message,
        "An error occurred during benchmark analysis. Check the backend console."
    );

    h.orchestrator.activate_view(ViewSelector::Simulator).await;
    h.orchestrator.activate_view(ViewSelector::Benchmark).await;
    assert_eq!(h.backend.benchmark.calls(), 1);

    // A new result gets its own attempt.
    h.analyse("report.pdf", "Acme").await;
    let retry = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.activate_view(ViewSelector::Benchmark).await }
    });
    h.backend.benchmark.next().await.answer(Ok("ok".into()));
    retry.await.unwrap();
    assert_eq!(h.backend.benchmark.calls(), 2);
}

// ============================================================================
// Report export
// ============================================================================

#[tokio::test]
async fn test_export_delivers_prefixed_file_name() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let export = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.export_report().await }
    });
    let parked = h.backend.report.next().await;
    assert_eq!(parked.label, "report.pdf");
    assert!(h.orchestrator.snapshot().await.exporting);
    parked.answer(Ok(casefile_backend::ReportArtifact::new(vec![0u8; 16])));

    let path = export.await.unwrap().applied().unwrap();
    let expected = format!("{}_report.pdf.docx", PREFIX);
    assert!(path.ends_with(&expected));
    assert_eq!(h.sink.delivered(), vec![(expected, 16)]);
    assert!(!h.orchestrator.snapshot().await.exporting);
}

#[tokio::test]
async fn test_export_failure_only_touches_error_slot() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let before = h.orchestrator.snapshot().await;

    let export = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.export_report().await }
    });
    h.backend.report.next().await.answer(Err(network_error()));
    assert!(matches!(export.await.unwrap(), Outcome::Failed(ref e) if e.kind == ErrorKind::NetworkError));

    let after = h.orchestrator.snapshot().await;
    assert_eq!(
        after.error.as_ref().unwrap().message,
        "An error occurred during download. Check the backend console."
    );
    assert_eq!(after.result, before.result);
    assert_eq!(after.transcript, before.transcript);
    assert_eq!(after.active_view, before.active_view);
    assert!(!after.exporting);
    assert!(h.sink.delivered().is_empty());
}

#[tokio::test]
async fn test_analysis_cannot_restart_during_export() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let export = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.export_report().await }
    });
    let parked = h.backend.report.next().await;

    assert_eq!(
        h.orchestrator.submit().await,
        Outcome::Rejected(Rejection::Busy)
    );
    assert_eq!(
        h.orchestrator.export_report().await,
        Outcome::Rejected(Rejection::Busy)
    );

    parked.answer(Ok(casefile_backend::ReportArtifact::new(vec![1u8])));
    assert!(export.await.unwrap().is_applied());
}

#[tokio::test]
async fn test_report_for_superseded_session_is_not_delivered() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let export = tokio::spawn({
        let orchestrator = h.orchestrator.clone();
        async move { orchestrator.export_report().await }
    });
    let parked = h.backend.report.next().await;

    h.orchestrator.reset().await;
    parked.answer(Ok(casefile_backend::ReportArtifact::new(vec![1u8])));

    assert_eq!(export.await.unwrap(), Outcome::Discarded);
    assert!(h.sink.delivered().is_empty());
    let snapshot = h.orchestrator.snapshot().await;
    assert!(!snapshot.exporting);
    assert!(snapshot.error.is_none());
}
