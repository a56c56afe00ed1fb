// crates/file-router-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Backends
// Description: Mutex-backed implementations of the backend interfaces.
// Purpose: Back the test suites and local development without services.
// Dependencies: crate::core, crate::interfaces, time
// ============================================================================

//! ## Overview
//! These implementations mirror the contracts of the production backends
//! closely enough for the engine and aggregator test suites: the audit store
//! assigns insert timestamps and aggregates windows, the report sink
//! overwrites on name collision, and the routing-table source hands out a
//! fixed table on every load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use time::Duration;
use time::OffsetDateTime;

use crate::core::ActivitySummary;
use crate::core::ActivityWindow;
use crate::core::AuditRecord;
use crate::core::DestinationCount;
use crate::core::NewAuditRecord;
use crate::core::RoutingTable;
use crate::core::RoutingTableError;
use crate::interfaces::AuditStore;
use crate::interfaces::AuditStoreError;
use crate::interfaces::ReportSink;
use crate::interfaces::ReportSinkError;
use crate::interfaces::RoutingTableSource;

// ============================================================================
// SECTION: Audit Store
// ============================================================================

/// Mutex-backed append-only audit store.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    /// Records in insertion order.
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryAuditStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record with an explicit insert timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AuditStoreError::Write`] when the store mutex is poisoned.
    pub fn insert_at(
        &self,
        record: NewAuditRecord,
        processed_at: OffsetDateTime,
    ) -> Result<(), AuditStoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AuditStoreError::Write("audit store mutex poisoned".to_string()))?;
        records.push(AuditRecord {
            record,
            processed_at,
        });
        Ok(())
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AuditStoreError::Query`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, AuditStoreError> {
        Ok(self.guard()?.len())
    }

    /// Returns true when no records are stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuditStoreError::Query`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, AuditStoreError> {
        Ok(self.guard()?.is_empty())
    }

    /// Locks the record list for reading.
    fn guard(&self) -> Result<MutexGuard<'_, Vec<AuditRecord>>, AuditStoreError> {
        self.records
            .lock()
            .map_err(|_| AuditStoreError::Query("audit store mutex poisoned".to_string()))
    }
}

impl AuditStore for InMemoryAuditStore {
    fn find_by_file_name(&self, file_name: &str) -> Result<Option<AuditRecord>, AuditStoreError> {
        let records = self.guard()?;
        Ok(records.iter().find(|row| row.record.file_name == file_name).cloned())
    }

    fn insert(&self, record: NewAuditRecord) -> Result<(), AuditStoreError> {
        self.insert_at(record, OffsetDateTime::now_utc())
    }

    fn query_window(
        &self,
        until: OffsetDateTime,
        window_minutes: i64,
    ) -> Result<ActivityWindow, AuditStoreError> {
        let since = until - Duration::minutes(window_minutes);
        let records = self.guard()?;
        let mut summary = ActivitySummary {
            total_files: 0,
            success_count: 0,
            failure_count: 0,
        };
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for row in
            records.iter().filter(|row| row.processed_at >= since && row.processed_at <= until)
        {
            summary.total_files += 1;
            if row.record.status.is_success() {
                summary.success_count += 1;
            } else {
                summary.failure_count += 1;
            }
            *counts.entry(row.record.destination_container.clone()).or_insert(0) += 1;
        }
        let breakdown = counts
            .into_iter()
            .map(|(destination_container, file_count)| DestinationCount {
                destination_container,
                file_count,
            })
            .collect();
        Ok(ActivityWindow {
            summary,
            breakdown,
        })
    }
}

// ============================================================================
// SECTION: Report Sink
// ============================================================================

/// Mutex-backed report sink keyed by artifact name.
#[derive(Debug, Default)]
pub struct InMemoryReportSink {
    /// Artifacts by name; writes overwrite.
    reports: Mutex<BTreeMap<String, String>>,
}

impl InMemoryReportSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored artifact under `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ReportSinkError::Write`] when the sink mutex is poisoned.
    pub fn get(&self, name: &str) -> Result<Option<String>, ReportSinkError> {
        let reports = self
            .reports
            .lock()
            .map_err(|_| ReportSinkError::Write("report sink mutex poisoned".to_string()))?;
        Ok(reports.get(name).cloned())
    }

    /// Returns the stored artifact names in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportSinkError::Write`] when the sink mutex is poisoned.
    pub fn names(&self) -> Result<Vec<String>, ReportSinkError> {
        let reports = self
            .reports
            .lock()
            .map_err(|_| ReportSinkError::Write("report sink mutex poisoned".to_string()))?;
        Ok(reports.keys().cloned().collect())
    }
}

impl ReportSink for InMemoryReportSink {
    fn put_report(&self, name: &str, contents: &str) -> Result<(), ReportSinkError> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|_| ReportSinkError::Write("report sink mutex poisoned".to_string()))?;
        reports.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

// ============================================================================
// SECTION: Routing Table Source
// ============================================================================

/// Routing-table source that hands out a fixed table.
#[derive(Debug, Clone)]
pub struct StaticRoutingTableSource {
    /// Table returned by every load.
    table: RoutingTable,
}

impl StaticRoutingTableSource {
    /// Creates a source over a fixed table.
    #[must_use]
    pub const fn new(table: RoutingTable) -> Self {
        Self {
            table,
        }
    }
}

impl RoutingTableSource for StaticRoutingTableSource {
    fn load(&self) -> Result<RoutingTable, RoutingTableError> {
        Ok(self.table.clone())
    }
}
