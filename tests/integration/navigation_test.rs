//! Navigation Integration Tests
//!
//! View unlock policy as seen through the orchestrator and the snapshot's
//! navigation items.

use casefile_core::ViewSelector;

use crate::common::{document, harness};

#[tokio::test]
async fn test_deep_link_to_simulator_without_result_stays_on_analysis() {
    let h = harness();
    let activation = h
        .orchestrator
        .activate_view_from_link("simulator")
        .await
        .unwrap();
    assert!(!activation.accepted);
    assert_eq!(activation.view, ViewSelector::Analysis);
    assert_eq!(
        h.orchestrator.snapshot().await.active_view,
        ViewSelector::Analysis
    );
}

#[tokio::test]
async fn test_unknown_deep_link_is_ignored() {
    let h = harness();
    h.orchestrator.activate_view(ViewSelector::About).await;
    assert!(h.orchestrator.activate_view_from_link("admin").await.is_none());
    assert!(h.orchestrator.activate_view_from_link("").await.is_none());
    assert_eq!(h.orchestrator.snapshot().await.active_view, ViewSelector::About);
}

#[tokio::test]
async fn test_deep_link_to_simulator_with_result() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    let activation = h
        .orchestrator
        .activate_view_from_link("simulator")
        .await
        .unwrap();
    assert!(activation.accepted);
    assert_eq!(activation.view, ViewSelector::Simulator);
    assert_eq!(h.backend.benchmark.calls(), 0);
}

#[tokio::test]
async fn test_nav_items_follow_result() {
    let h = harness();
    let locked = h.orchestrator.snapshot().await.nav;
    let enabled: Vec<_> = locked
        .iter()
        .filter(|item| item.enabled)
        .map(|item| item.view)
        .collect();
    assert_eq!(enabled, vec![ViewSelector::Analysis]);

    h.analyse("report.pdf", "Acme").await;
    let unlocked = h.orchestrator.snapshot().await.nav;
    assert!(unlocked.iter().all(|item| item.enabled));
    assert!(unlocked
        .iter()
        .any(|item| item.view == ViewSelector::Analysis && item.active));
}

#[tokio::test]
async fn test_new_document_relocks_dependent_views() {
    let h = harness();
    h.analyse("report.pdf", "Acme").await;
    h.orchestrator.activate_view(ViewSelector::Simulator).await;

    h.orchestrator.select_document(document("next.xlsx")).await;
    let snapshot = h.orchestrator.snapshot().await;
    assert_eq!(snapshot.active_view, ViewSelector::Analysis);
    assert!(!snapshot.has_result());

    let activation = h.orchestrator.activate_view(ViewSelector::Simulator).await;
    assert!(!activation.accepted);
}
