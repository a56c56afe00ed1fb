// crates/file-router-core/tests/report.rs
// ============================================================================
// Module: Report Aggregator Tests
// Description: Trailing-window aggregation and artifact publication coverage.
// Purpose: Verify window boundaries, rendering, and the dual-name contract.
// Dependencies: file-router-core
// ============================================================================

//! ## Overview
//! Runs the report aggregator against seeded in-memory audit trails with
//! injected clocks, covering window boundaries, breakdown ordering, CSV
//! rendering, and the unique-plus-latest artifact naming contract.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use std::sync::Arc;

use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

use file_router_core::AuditStatus;
use file_router_core::InMemoryAuditStore;
use file_router_core::InMemoryReportSink;
use file_router_core::NewAuditRecord;
use file_router_core::ReportAggregator;

fn record(file_name: &str, destination: &str, status: AuditStatus) -> NewAuditRecord {
    NewAuditRecord {
        file_name: file_name.to_string(),
        source_container: "vendor-inbound".to_string(),
        destination_container: destination.to_string(),
        status,
        error_message: (!status.is_success()).then(|| "failed".to_string()),
        processing_time_ms: status.is_success().then_some(12),
    }
}

fn seed(store: &InMemoryAuditStore, now: OffsetDateTime) {
    store
        .insert_at(
            record("recent-ok.csv", "vendor-processed", AuditStatus::Success),
            now - Duration::minutes(5),
        )
        .expect("insert");
    store
        .insert_at(
            record("recent-bad.csv", "vendor-quarantine", AuditStatus::FailedMetadata),
            now - Duration::minutes(59),
        )
        .expect("insert");
    store
        .insert_at(
            record("stale.csv", "vendor-processed", AuditStatus::Success),
            now - Duration::minutes(61),
        )
        .expect("insert");
}

#[test]
fn window_includes_fifty_nine_minutes_and_excludes_sixty_one() {
    let now = datetime!(2026-08-25 12:00:00 UTC);
    let store = Arc::new(InMemoryAuditStore::new());
    seed(&store, now);

    let sink = Arc::new(InMemoryReportSink::new());
    let run = ReportAggregator::new(store, sink).run_at(now).expect("run");

    assert_eq!(run.window.summary.total_files, 2);
    assert_eq!(run.window.summary.success_count, 1);
    assert_eq!(run.window.summary.failure_count, 1);
}

#[test]
fn record_exactly_sixty_minutes_old_is_counted() {
    let now = datetime!(2026-08-25 12:00:00 UTC);
    let store = Arc::new(InMemoryAuditStore::new());
    store
        .insert_at(
            record("boundary.csv", "vendor-processed", AuditStatus::Success),
            now - Duration::minutes(60),
        )
        .expect("insert");

    let sink = Arc::new(InMemoryReportSink::new());
    let run = ReportAggregator::new(store, sink).run_at(now).expect("run");

    assert_eq!(run.window.summary.total_files, 1);
    assert_eq!(run.window.summary.success_count, 1);
}

#[test]
fn breakdown_is_sorted_by_destination_name() {
    let now = datetime!(2026-08-25 12:00:00 UTC);
    let store = Arc::new(InMemoryAuditStore::new());
    seed(&store, now);

    let sink = Arc::new(InMemoryReportSink::new());
    let run = ReportAggregator::new(store, sink).run_at(now).expect("run");

    let destinations: Vec<&str> = run
        .window
        .breakdown
        .iter()
        .map(|entry| entry.destination_container.as_str())
        .collect();
    assert_eq!(destinations, vec!["vendor-processed", "vendor-quarantine"]);
}

#[test]
fn run_writes_both_artifact_names_with_identical_contents() {
    let now = datetime!(2026-08-25 12:00:00 UTC);
    let store = Arc::new(InMemoryAuditStore::new());
    seed(&store, now);

    let sink = Arc::new(InMemoryReportSink::new());
    let run = ReportAggregator::new(store, sink.clone()).run_at(now).expect("run");

    assert_eq!(run.unique_name, "report-2026-08-25T12-00-00Z.csv");
    assert_eq!(run.latest_name, "report-2026-08-25T12-latest.csv");
    let unique = sink.get(&run.unique_name).expect("sink").expect("unique artifact");
    let latest = sink.get(&run.latest_name).expect("sink").expect("latest artifact");
    assert_eq!(unique, latest);
    assert!(unique.starts_with("report_generated_at,2026-08-25T12:00:00Z\n"));
}

#[test]
fn later_run_in_the_same_hour_overwrites_latest_only() {
    let store = Arc::new(InMemoryAuditStore::new());
    let sink = Arc::new(InMemoryReportSink::new());
    let aggregator = ReportAggregator::new(store.clone(), sink.clone());

    let first = datetime!(2026-08-25 12:05:00 UTC);
    aggregator.run_at(first).expect("first run");

    store
        .insert_at(
            record("late.csv", "vendor-processed", AuditStatus::Success),
            datetime!(2026-08-25 12:10:00 UTC),
        )
        .expect("insert");

    let second = datetime!(2026-08-25 12:30:00 UTC);
    let run = aggregator.run_at(second).expect("second run");

    let names = sink.names().expect("names");
    assert_eq!(names.len(), 3);
    let latest = sink.get(&run.latest_name).expect("sink").expect("latest artifact");
    assert!(latest.contains("total_files,1"));
    assert!(latest.contains("report_generated_at,2026-08-25T12:30:00Z"));
}

#[test]
fn empty_window_renders_zero_counts_and_no_breakdown_rows() {
    let now = datetime!(2026-08-25 03:00:00 UTC);
    let store = Arc::new(InMemoryAuditStore::new());
    let sink = Arc::new(InMemoryReportSink::new());
    let run = ReportAggregator::new(store, sink.clone()).run_at(now).expect("run");

    assert_eq!(run.window.summary.total_files, 0);
    assert!(run.window.breakdown.is_empty());
    let artifact = sink.get(&run.unique_name).expect("sink").expect("artifact");
    assert!(artifact.ends_with("destination_container,file_count\n"));
}
