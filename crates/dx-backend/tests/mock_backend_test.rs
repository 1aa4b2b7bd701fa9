//! Behaviour of the mock backend over the seed dataset.

use std::sync::Arc;
use std::time::Duration;

use dx_api_types::ApiError;
use dx_backend::{AlertBoard, DataBackend, Endpoint, MockBackend, ReportShelf, MOCK_TOKEN};
use dx_core::dataset::Dataset;
use dx_core::query::{AlertFilter, NarrativeFilter, Pagination, ReportFilter, TimelineFilter};
use dx_core::types::*;
use dx_harness::fault::AlwaysFail;
use dx_harness::latency::DelaySimulator;
use dx_harness::profile::EndpointProfile;
use dx_harness::Simulator;
use dx_telemetry::metrics::{MetricsCollector, BACKEND_FAULTS, BACKEND_REQUESTS};

fn dataset() -> Arc<Dataset> {
    Arc::new(Dataset::seed().unwrap())
}

fn instant() -> MockBackend {
    MockBackend::instant(dataset())
}

fn failing() -> MockBackend {
    MockBackend::new(
        dataset(),
        Simulator::new(DelaySimulator::instant(), Arc::new(AlwaysFail)),
    )
}

fn leaked_metrics() -> &'static MetricsCollector {
    Box::leak(Box::new(MetricsCollector::new()))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vote_rigging_filter_returns_one_narrative() {
    let backend = instant();
    let criteria = NarrativeFilter {
        category: Some(NarrativeCategory::VoteRigging),
        ..Default::default()
    };
    let page = backend
        .list_narratives(&criteria, Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "1");
    assert_eq!(page.meta.total, 1);
}

#[tokio::test]
async fn pagination_reports_unsliced_total() {
    let backend = instant();
    let page = backend
        .list_narratives(&NarrativeFilter::default(), Pagination::new(2, 2))
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "4"]);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.page, 2);
}

#[tokio::test]
async fn lists_are_idempotent() {
    let backend = instant();
    let a = backend
        .list_actors(&Default::default(), Pagination::default())
        .await
        .unwrap();
    let b = backend
        .list_actors(&Default::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let b = instant();
    let missing = "does-not-exist";
    assert_eq!(b.narrative(missing).await.unwrap_err(), ApiError::not_found("Narrative"));
    assert_eq!(b.actor(missing).await.unwrap_err(), ApiError::not_found("Actor"));
    assert_eq!(b.alert(missing).await.unwrap_err(), ApiError::not_found("Alert"));
    assert_eq!(b.report(missing).await.unwrap_err(), ApiError::not_found("Report"));
    assert!(matches!(b.related_narratives(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(b.narrative_timeline(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(b.actor_network(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(b.actor_activity(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(b.acknowledge_alert(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(b.escalate_alert(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(b.delete_narrative(missing).await, Err(ApiError::NotFound { .. })));
    assert!(matches!(
        b.update_narrative(missing, &NarrativePatch::default()).await,
        Err(ApiError::NotFound { .. })
    ));
    assert!(matches!(b.lexicon_terms("xx").await, Err(ApiError::NotFound { .. })));
}

#[tokio::test]
async fn timeline_is_sorted_and_carries_stats() {
    let view = instant().timeline(&TimelineFilter::default()).await.unwrap();
    assert_eq!(view.events.len(), 6);
    assert!(view.events.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(view.stats.total_events, 24);
}

#[tokio::test]
async fn narrative_timeline_only_has_that_narrative() {
    let events = instant().narrative_timeline("1").await.unwrap();
    assert_eq!(events.len(), 6);
    assert!(events.iter().all(|e| e.narrative_id == "1"));
    assert!(instant().narrative_timeline("2").await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_summary_matches_seed() {
    let summary = instant().dashboard_summary().await.unwrap();
    assert_eq!(summary.stats.len(), 4);
    assert_eq!(summary.recent_activity.len(), 4);
    assert_eq!(summary.alerts.len(), 3);
}

#[tokio::test]
async fn lexicon_terms_for_known_language() {
    let backend = instant();
    let lexicons = backend.lexicons().await.unwrap();
    assert_eq!(lexicons.len(), 5);
    let entries = backend.lexicon_terms("pcm").await.unwrap();
    assert_eq!(entries.language, "pcm");
    assert!(!entries.terms.is_empty());
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_seeded_email() {
    let grant = instant()
        .login(&Credentials::new("demo@example.com", "anything"))
        .await
        .unwrap();
    assert_eq!(grant.token, MOCK_TOKEN);
    assert_eq!(grant.user.id, "user-123");
}

#[tokio::test]
async fn login_rejects_blank_or_unknown() {
    let backend = instant();
    for (email, password) in [
        ("", "pw"),
        ("demo@example.com", ""),
        ("stranger@example.com", "pw"),
    ] {
        assert_eq!(
            backend
                .login(&Credentials::new(email, password))
                .await
                .unwrap_err(),
            ApiError::InvalidCredentials
        );
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_reports_get_fresh_ids_and_do_not_touch_the_store() {
    let backend = instant();
    let mut request = ReportRequest::new("Weekly Trends", ReportKind::Trend);
    let first = backend.create_report(&request).await.unwrap();
    request.include_charts = false;
    request.include_recommendations = false;
    let second = backend.create_report(&request).await.unwrap();

    assert!(first.id.starts_with("report-"));
    assert_ne!(first.id, second.id);
    assert_eq!(first.report_type, "Trend Analysis");
    assert_eq!(first.visualizations.len(), 2);
    assert_eq!(first.recommendations.len(), 3);
    assert!(second.visualizations.is_empty());
    assert!(second.recommendations.is_empty());
    assert_eq!(second.key_findings.len(), 3);

    let reports = backend
        .list_reports(&ReportFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(reports.meta.total, 3);
}

#[tokio::test]
async fn export_accepts_generated_report_ids() {
    let backend = instant();
    let ticket = backend
        .export_report("report-42", ExportFormat::Csv)
        .await
        .unwrap();
    assert_eq!(ticket.url, "https://example.com/reports/report-42.csv");
    assert_eq!(ticket.format, ExportFormat::Csv);
}

#[tokio::test]
async fn narrative_writes_return_values_only() {
    let backend = instant();
    let draft = NarrativeDraft {
        title: "Fake polling unit relocation".into(),
        description: String::new(),
        category: NarrativeCategory::ProceduralMisinformation,
        languages: vec!["en".into()],
        platforms: vec!["whatsapp".into()],
    };
    let created = backend.create_narrative(&draft).await.unwrap();
    assert!(created.id.starts_with("narrative-"));
    assert!(matches!(
        backend.narrative(&created.id).await,
        Err(ApiError::NotFound { .. })
    ));

    let patch = NarrativePatch {
        trend: Some(Trend::Decreasing),
        ..Default::default()
    };
    let updated = backend.update_narrative("1", &patch).await.unwrap();
    assert_eq!(updated.trend, Trend::Decreasing);
    assert_eq!(backend.narrative("1").await.unwrap().trend, Trend::Increasing);

    let deleted = backend.delete_narrative("2").await.unwrap();
    assert!(deleted.deleted);
    assert!(backend.narrative("2").await.is_ok());
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn acknowledging_removes_alert_from_active() {
    let backend = instant();
    let mut board = AlertBoard::load(&backend, &AlertFilter::default())
        .await
        .unwrap();
    assert_eq!(board.active().count(), 4);

    let ack = board.acknowledge(&backend, "2").await.unwrap();
    assert!(ack.acknowledged);
    assert_eq!(board.active().count(), 3);
    assert!(board.active().all(|a| a.id != "2"));
}

#[tokio::test]
async fn escalating_changes_only_severity() {
    let backend = instant();
    let mut board = AlertBoard::load(&backend, &AlertFilter::default())
        .await
        .unwrap();
    let before = board.get("3").unwrap().clone();

    board.escalate(&backend, "3").await.unwrap();
    let after = board.get("3").unwrap();
    assert_eq!(after.severity, Severity::Critical);
    assert_eq!(
        Alert {
            severity: before.severity,
            ..after.clone()
        },
        before
    );
}

#[tokio::test]
async fn failed_acknowledge_leaves_board_alone() {
    let backend = failing();
    let alerts = instant()
        .list_alerts(&AlertFilter::default(), Pagination::default())
        .await
        .unwrap()
        .items;
    let mut board = AlertBoard::from_alerts(alerts);
    assert!(board.acknowledge(&backend, "1").await.is_err());
    assert_eq!(board.active().count(), 4);
}

#[tokio::test]
async fn report_shelf_prepends_and_removes() {
    let backend = instant();
    let mut shelf = ReportShelf::load(&backend, &ReportFilter::default())
        .await
        .unwrap();
    assert_eq!(shelf.reports().len(), 3);

    let id = shelf
        .create(&backend, &ReportRequest::new("Ad hoc", ReportKind::Summary))
        .await
        .unwrap()
        .id
        .clone();
    assert_eq!(shelf.reports()[0].id, id);
    assert_eq!(shelf.reports().len(), 4);

    assert!(shelf.remove(&id).is_some());
    assert!(shelf.remove(&id).is_none());
    assert_eq!(shelf.reports().len(), 3);
}

// ---------------------------------------------------------------------------
// Faults and latency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn injected_faults_are_transient_with_endpoint_messages() {
    let metrics = leaked_metrics();
    let backend = failing().with_metrics(metrics);

    assert_eq!(
        backend.dashboard_trends().await.unwrap_err(),
        ApiError::Transient("Failed to fetch trend data".into())
    );
    let err = backend
        .create_report(&ReportRequest::new("x", ReportKind::Summary))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to generate report");
    assert!(err.is_transient());
    // Faults win over lookups: the id is never checked.
    assert_eq!(
        backend.narrative("missing").await.unwrap_err(),
        ApiError::Transient("Network error occurred".into())
    );

    let labels = [("endpoint", Endpoint::DashboardTrends.name())];
    assert_eq!(metrics.get_counter(BACKEND_REQUESTS, &labels), 1);
    assert_eq!(metrics.get_counter(BACKEND_FAULTS, &labels), 1);
}

#[tokio::test]
async fn successful_calls_are_counted_without_faults() {
    let metrics = leaked_metrics();
    let backend = instant().with_metrics(metrics);
    backend.lexicons().await.unwrap();
    backend.lexicons().await.unwrap();
    let labels = [("endpoint", "lexicon.list")];
    assert_eq!(metrics.get_counter(BACKEND_REQUESTS, &labels), 2);
    assert_eq!(metrics.get_counter(BACKEND_FAULTS, &labels), 0);
}

#[tokio::test]
async fn profile_override_forces_failure_on_one_endpoint() {
    let backend = instant().with_profile(Endpoint::Alert, EndpointProfile::new(0, 1.0));
    // NeverFail ignores probabilities, so the override has no effect here.
    assert!(backend.alert("1").await.is_ok());

    let random = MockBackend::new(
        dataset(),
        Simulator::new(
            DelaySimulator::instant(),
            Arc::new(dx_harness::fault::RandomFaults::seeded(7)),
        ),
    )
    .with_profile(Endpoint::Alert, EndpointProfile::new(0, 1.0))
    .with_profile(Endpoint::Actor, EndpointProfile::new(0, 0.0));
    assert!(random.alert("1").await.is_err());
    assert!(random.actor("1").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn realistic_latency_is_waited_out() {
    let backend = MockBackend::new(
        dataset(),
        Simulator::new(
            DelaySimulator::realistic(),
            Arc::new(dx_harness::fault::NeverFail),
        ),
    );
    let start = tokio::time::Instant::now();
    backend
        .create_report(&ReportRequest::new("slow", ReportKind::Comprehensive))
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn failures_take_as_long_as_successes() {
    let backend = MockBackend::new(
        dataset(),
        Simulator::new(DelaySimulator::realistic(), Arc::new(AlwaysFail)),
    );
    let start = tokio::time::Instant::now();
    assert!(backend.logout().await.is_err());
    assert!(start.elapsed() >= Duration::from_millis(300));
}
