// crates/file-router-core/src/runtime/report.rs
// ============================================================================
// Module: Report Aggregator
// Description: Trailing-window activity report rendering and publication.
// Purpose: Produce the hourly activity artifacts from the audit trail.
// Dependencies: crate::core, crate::interfaces, thiserror, time
// ============================================================================

//! ## Overview
//! Each report run queries the audit trail for the trailing sixty minutes,
//! renders one comma-separated artifact, and writes it twice: once under a
//! unique second-resolution name that accumulates a history, and once under
//! an hour-resolution `latest` name that successive runs within the same
//! hour overwrite. Runs are on-demand and stateless; nothing is scheduled
//! and nothing is cached between runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;

use crate::core::ActivityWindow;
use crate::interfaces::AuditStore;
use crate::interfaces::AuditStoreError;
use crate::interfaces::ReportSink;
use crate::interfaces::ReportSinkError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Trailing window length in minutes.
pub const WINDOW_MINUTES: i64 = 60;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Report run errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The window aggregation query failed.
    #[error(transparent)]
    Query(#[from] AuditStoreError),
    /// Writing a report artifact failed.
    #[error(transparent)]
    Sink(#[from] ReportSinkError),
}

// ============================================================================
// SECTION: Run Outcome
// ============================================================================

/// Outcome of one completed report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRun {
    /// Instant the report was generated at.
    pub generated_at: OffsetDateTime,
    /// Unique second-resolution artifact name.
    pub unique_name: String,
    /// Hour-resolution artifact name overwritten within the hour.
    pub latest_name: String,
    /// Aggregated window the artifact was rendered from.
    pub window: ActivityWindow,
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

/// On-demand activity report generator.
pub struct ReportAggregator {
    /// Audit trail queried for the trailing window.
    store: Arc<dyn AuditStore>,
    /// Artifact destination.
    sink: Arc<dyn ReportSink>,
}

impl ReportAggregator {
    /// Creates a report aggregator over the given backends.
    #[must_use]
    pub fn new(store: Arc<dyn AuditStore>, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            store,
            sink,
        }
    }

    /// Runs one report anchored at the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Propagates audit-store and report-sink faults; on any fault no
    /// partial state is retained and the run can simply be retried.
    pub fn run(&self) -> Result<ReportRun, ReportError> {
        self.run_at(OffsetDateTime::now_utc())
    }

    /// Runs one report anchored at an explicit instant.
    ///
    /// # Errors
    ///
    /// Propagates audit-store and report-sink faults.
    pub fn run_at(&self, now: OffsetDateTime) -> Result<ReportRun, ReportError> {
        let window = self.store.query_window(now, WINDOW_MINUTES)?;
        let contents = render_report(now, &window);
        let unique_name = unique_report_name(now);
        let latest_name = latest_report_name(now);
        self.sink.put_report(&unique_name, &contents)?;
        self.sink.put_report(&latest_name, &contents)?;
        Ok(ReportRun {
            generated_at: now,
            unique_name,
            latest_name,
            window,
        })
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the comma-separated report artifact.
#[must_use]
pub fn render_report(generated_at: OffsetDateTime, window: &ActivityWindow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "report_generated_at,{}", iso_second(generated_at));
    let _ = writeln!(out);
    let _ = writeln!(out, "total_files,{}", window.summary.total_files);
    let _ = writeln!(out, "success_count,{}", window.summary.success_count);
    let _ = writeln!(out, "failure_count,{}", window.summary.failure_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "destination_container,file_count");
    for entry in &window.breakdown {
        let _ = writeln!(out, "{},{}", entry.destination_container, entry.file_count);
    }
    out
}

/// Formats the second-resolution UTC timestamp embedded in the artifact.
fn iso_second(at: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Builds the unique second-resolution artifact name.
#[must_use]
pub fn unique_report_name(at: OffsetDateTime) -> String {
    format!(
        "report-{:04}-{:02}-{:02}T{:02}-{:02}-{:02}Z.csv",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Builds the hour-resolution `latest` artifact name.
#[must_use]
pub fn latest_report_name(at: OffsetDateTime) -> String {
    format!(
        "report-{:04}-{:02}-{:02}T{:02}-latest.csv",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour()
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
