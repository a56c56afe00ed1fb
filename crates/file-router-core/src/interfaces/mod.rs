// crates/file-router-core/src/interfaces/mod.rs
// ============================================================================
// Module: Backend Interfaces
// Description: Trait seams for the audit store, object storage, and config.
// Purpose: Keep the routing engine backend-agnostic and fully testable.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The routing engine and the report aggregator never talk to a datastore,
//! an object-storage service, or a config endpoint directly. Each external
//! concern is a trait implemented by a backend crate; in-memory
//! implementations in [`crate::runtime::memory`] back the test suites.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::OffsetDateTime;

use crate::core::ActivityWindow;
use crate::core::AuditRecord;
use crate::core::NewAuditRecord;
use crate::core::RoutingTable;
use crate::core::RoutingTableError;

// ============================================================================
// SECTION: Audit Store
// ============================================================================

/// Audit store errors.
#[derive(Debug, Error)]
pub enum AuditStoreError {
    /// A read query against the audit trail failed.
    #[error("audit store query error: {0}")]
    Query(String),
    /// An insert into the audit trail failed.
    #[error("audit store write error: {0}")]
    Write(String),
}

/// Append-only audit trail backing the idempotency check and the report.
///
/// # Invariants
/// - Records are never mutated or deleted once inserted.
/// - `insert` assigns the `processed_at` timestamp at write time.
pub trait AuditStore: Send + Sync {
    /// Returns the stored record for a file name, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AuditStoreError::Query`] when the lookup fails.
    fn find_by_file_name(&self, file_name: &str) -> Result<Option<AuditRecord>, AuditStoreError>;

    /// Appends one audit record, assigning the insert timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AuditStoreError::Write`] when the insert fails.
    fn insert(&self, record: NewAuditRecord) -> Result<(), AuditStoreError>;

    /// Aggregates records inserted in the trailing window ending at `until`.
    ///
    /// # Errors
    ///
    /// Returns [`AuditStoreError::Query`] when aggregation fails.
    fn query_window(
        &self,
        until: OffsetDateTime,
        window_minutes: i64,
    ) -> Result<ActivityWindow, AuditStoreError>;
}

// ============================================================================
// SECTION: Object Relocation
// ============================================================================

/// Object relocation errors.
#[derive(Debug, Error)]
pub enum RelocationError {
    /// The copy to the destination container failed.
    #[error("object copy error: {0}")]
    Copy(String),
}

/// Copies an object from a source container to a destination path.
///
/// # Invariants
/// - The source object is left in place; relocation is copy-only.
/// - An existing object at the destination path is overwritten.
pub trait ObjectRelocator: Send + Sync {
    /// Copies `file_name` from `source_container` to `destination_path`
    /// inside `destination_container`.
    ///
    /// # Errors
    ///
    /// Returns [`RelocationError::Copy`] when the copy fails for any reason,
    /// including a missing source object.
    fn copy(
        &self,
        source_container: &str,
        file_name: &str,
        destination_container: &str,
        destination_path: &str,
    ) -> Result<(), RelocationError>;
}

// ============================================================================
// SECTION: Routing Table Source
// ============================================================================

/// Loads the routing-table artifact fresh on every call.
///
/// # Invariants
/// - No caching between invocations; edits to the artifact take effect on
///   the next routed event.
pub trait RoutingTableSource: Send + Sync {
    /// Fetches and parses the current routing table.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingTableError::Fetch`] when retrieval fails and
    /// [`RoutingTableError::Parse`] when the artifact is malformed.
    fn load(&self) -> Result<RoutingTable, RoutingTableError>;
}

// ============================================================================
// SECTION: Report Sink
// ============================================================================

/// Report sink errors.
#[derive(Debug, Error)]
pub enum ReportSinkError {
    /// Writing the rendered report artifact failed.
    #[error("report write error: {0}")]
    Write(String),
}

/// Stores rendered report artifacts under caller-chosen names.
///
/// # Invariants
/// - Writing to an existing name replaces the previous artifact.
pub trait ReportSink: Send + Sync {
    /// Writes one rendered report under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportSinkError::Write`] when the write fails.
    fn put_report(&self, name: &str, contents: &str) -> Result<(), ReportSinkError>;
}
