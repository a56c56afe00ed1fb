// crates/file-router-server/src/decision_log.rs
// ============================================================================
// Module: Decision Logging
// Description: Structured JSON-line events for routing and report requests.
// Purpose: Emit operational logs without hard pipeline dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines decision log payloads and sinks for request logging.
//! It is intentionally lightweight so deployments can route events to their
//! preferred logging pipeline without redesign. The decision log is
//! operational telemetry only; the durable record of every routing decision
//! is the audit trail in the datastore.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Routing decision log event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RouteLogEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// File name from the arrival notification.
    pub file_name: String,
    /// Source container from the arrival notification.
    pub source_container: String,
    /// Terminal disposition label.
    pub disposition: &'static str,
    /// Destination path for successful routes.
    pub destination_path: Option<String>,
}

/// Routing fault log event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RouteFaultEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// File name from the arrival notification, when decodable.
    pub file_name: Option<String>,
    /// Fault classification label.
    pub kind: &'static str,
    /// Fault detail.
    pub message: String,
}

/// Report generation log event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLogEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Unique timestamped artifact name.
    pub unique_file: String,
    /// Hour-scoped latest artifact name.
    pub latest_file: String,
    /// Total records in the reported window.
    pub total_files: i64,
    /// Successful records in the reported window.
    pub success_count: i64,
    /// Failed records in the reported window.
    pub failure_count: i64,
}

impl RouteLogEvent {
    /// Creates a routing event with a consistent timestamp.
    #[must_use]
    pub fn new(
        peer_ip: Option<String>,
        file_name: String,
        source_container: String,
        disposition: &'static str,
        destination_path: Option<String>,
    ) -> Self {
        Self {
            event: "file_routed",
            timestamp_ms: timestamp_ms(),
            peer_ip,
            file_name,
            source_container,
            disposition,
            destination_path,
        }
    }
}

impl RouteFaultEvent {
    /// Creates a fault event with a consistent timestamp.
    #[must_use]
    pub fn new(
        peer_ip: Option<String>,
        file_name: Option<String>,
        kind: &'static str,
        message: String,
    ) -> Self {
        Self {
            event: "route_fault",
            timestamp_ms: timestamp_ms(),
            peer_ip,
            file_name,
            kind,
            message,
        }
    }
}

impl ReportLogEvent {
    /// Creates a report event with a consistent timestamp.
    #[must_use]
    pub fn new(
        unique_file: String,
        latest_file: String,
        total_files: i64,
        success_count: i64,
        failure_count: i64,
    ) -> Self {
        Self {
            event: "report_generated",
            timestamp_ms: timestamp_ms(),
            unique_file,
            latest_file,
            total_files,
            success_count,
            failure_count,
        }
    }
}

/// Returns milliseconds since the Unix epoch.
fn timestamp_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Decision log sink for routing and report events.
pub trait DecisionLogSink: Send + Sync {
    /// Record a routing decision event.
    fn record_route(&self, event: &RouteLogEvent);

    /// Record a routing fault event.
    fn record_fault(&self, _event: &RouteFaultEvent) {}

    /// Record a report generation event.
    fn record_report(&self, _event: &ReportLogEvent) {}
}

/// Decision log sink that logs JSON lines to stderr.
pub struct StderrDecisionLogSink;

impl DecisionLogSink for StderrDecisionLogSink {
    fn record_route(&self, event: &RouteLogEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_fault(&self, event: &RouteFaultEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_report(&self, event: &ReportLogEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Decision log sink that logs JSON lines to a file.
pub struct FileDecisionLogSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDecisionLogSink {
    /// Opens the decision log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DecisionLogSink for FileDecisionLogSink {
    fn record_route(&self, event: &RouteLogEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }

    fn record_fault(&self, event: &RouteFaultEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }

    fn record_report(&self, event: &ReportLogEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op decision log sink.
pub struct NoopDecisionLogSink;

impl DecisionLogSink for NoopDecisionLogSink {
    fn record_route(&self, _event: &RouteLogEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::RouteLogEvent;

    #[test]
    fn route_event_serializes_with_stable_identifier() {
        let event = RouteLogEvent::new(
            Some("10.0.0.7".to_string()),
            "a.csv".to_string(),
            "vendor-inbound".to_string(),
            "succeeded",
            Some("folder1/a.csv".to_string()),
        );
        let payload = serde_json::to_string(&event).unwrap();
        assert!(payload.contains("\"event\":\"file_routed\""));
        assert!(payload.contains("\"disposition\":\"succeeded\""));
        assert!(payload.contains("\"destination_path\":\"folder1/a.csv\""));
    }
}
