// crates/file-router-core/src/core/audit.rs
// ============================================================================
// Module: Audit Records
// Description: Durable audit-trail rows and window aggregation payloads.
// Purpose: Define the append-only audit data model shared by router and report.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Every terminal routing decision produces exactly one [`AuditRecord`].
//! Records are append-only: never mutated, never deleted. System faults do
//! not produce a record; the invoking mechanism redelivers the whole event
//! and a record is written only once a terminal outcome is reached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Terminal disposition recorded in the audit trail.
///
/// # Invariants
/// - Labels are stable; they are persisted and parsed back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    /// File was routed to its mapped destination.
    Success,
    /// Vendor metadata was missing; file was quarantined.
    FailedMetadata,
    /// No routing rule matched; file was parked as unmapped.
    FailedConfig,
}

impl AuditStatus {
    /// Returns the stable persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::FailedMetadata => "FAILED_METADATA",
            Self::FailedConfig => "FAILED_CONFIG",
        }
    }

    /// Parses a persisted label back into a status.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "SUCCESS" => Some(Self::Success),
            "FAILED_METADATA" => Some(Self::FailedMetadata),
            "FAILED_CONFIG" => Some(Self::FailedConfig),
            _ => None,
        }
    }

    /// Returns true for the success disposition.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Audit row payload as inserted by the router.
///
/// # Invariants
/// - `processing_time_ms` is set only for [`AuditStatus::Success`].
/// - `error_message` is set only for failure statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuditRecord {
    /// File name the decision applies to (intended unique key).
    pub file_name: String,
    /// Container the file arrived in.
    pub source_container: String,
    /// Container the file was relocated to.
    pub destination_container: String,
    /// Terminal disposition.
    pub status: AuditStatus,
    /// Failure detail for non-success dispositions.
    pub error_message: Option<String>,
    /// Elapsed relocation time in milliseconds for successes.
    pub processing_time_ms: Option<i64>,
}

/// Stored audit row including the store-assigned timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Row payload as inserted.
    #[serde(flatten)]
    pub record: NewAuditRecord,
    /// Insert timestamp assigned by the store.
    #[serde(with = "time::serde::rfc3339")]
    pub processed_at: OffsetDateTime,
}

// ============================================================================
// SECTION: Window Aggregation
// ============================================================================

/// Summary counters over a trailing time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Total records in the window.
    pub total_files: i64,
    /// Records with [`AuditStatus::Success`].
    pub success_count: i64,
    /// Records with any failure status.
    pub failure_count: i64,
}

/// Per-destination record count over a trailing time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
    /// Destination container the records were routed to.
    pub destination_container: String,
    /// Number of records routed to the destination.
    pub file_count: i64,
}

/// Combined summary and breakdown for one window query.
///
/// # Invariants
/// - `breakdown` is ordered by destination container name ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityWindow {
    /// Summary counters.
    pub summary: ActivitySummary,
    /// Per-destination counts.
    pub breakdown: Vec<DestinationCount>,
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

    use super::AuditStatus;

    #[test]
    fn audit_status_labels_roundtrip() {
        for status in
            [AuditStatus::Success, AuditStatus::FailedMetadata, AuditStatus::FailedConfig]
        {
            assert_eq!(AuditStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn audit_status_parse_rejects_unknown_label() {
        assert_eq!(AuditStatus::parse("RETRYING"), None);
    }
}
