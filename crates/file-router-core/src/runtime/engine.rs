// crates/file-router-core/src/runtime/engine.rs
// ============================================================================
// Module: Routing Engine
// Description: Per-event routing state machine with audit and idempotency.
// Purpose: Drive one arrival event to exactly one terminal disposition.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! The engine processes one [`FileArrivalEvent`] at a time: idempotency check
//! first, then vendor inspection, then routing-table resolution, then
//! relocation, then the audit write. Relocation always happens before the
//! audit write so a fault between the two leaves the event replayable. A
//! business outcome (success, quarantine, unmapped) always produces exactly
//! one audit row; a system fault produces none and surfaces as an error so
//! the delivery mechanism redelivers the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::core::AuditStatus;
use crate::core::FileArrivalEvent;
use crate::core::NewAuditRecord;
use crate::core::RoutingTableError;
use crate::interfaces::AuditStore;
use crate::interfaces::AuditStoreError;
use crate::interfaces::ObjectRelocator;
use crate::interfaces::RelocationError;
use crate::interfaces::RoutingTableSource;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Routing engine system faults.
///
/// # Invariants
/// - Every variant means no audit row was committed for the event by this
///   invocation; the caller must surface an error status so the event is
///   redelivered.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The event is missing a file name or source container.
    #[error("structurally invalid event: {0}")]
    Structural(String),
    /// The routing table could not be fetched or parsed.
    #[error(transparent)]
    RoutingTable(#[from] RoutingTableError),
    /// The object copy to the destination failed.
    #[error(transparent)]
    Relocation(#[from] RelocationError),
    /// The audit store rejected a read or write.
    #[error(transparent)]
    Audit(#[from] AuditStoreError),
}

// ============================================================================
// SECTION: Containers
// ============================================================================

/// Destination containers the engine routes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterContainers {
    /// Container for successfully routed files.
    pub processed: String,
    /// Container for files arriving without vendor metadata.
    pub quarantine: String,
    /// Container for files whose vendor has no routing rule.
    pub unmapped: String,
}

// ============================================================================
// SECTION: Disposition
// ============================================================================

/// Terminal outcome of one routed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDisposition {
    /// An audit row already existed for the file name; nothing was done.
    AlreadyProcessed,
    /// Vendor metadata was missing; the file went to quarantine.
    Quarantined,
    /// No routing rule matched the vendor; the file went to unmapped.
    Unmapped,
    /// The file was routed to its mapped destination path.
    Succeeded {
        /// Path within the processed container the file was copied to.
        destination_path: String,
    },
}

impl RouteDisposition {
    /// Returns a stable label for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AlreadyProcessed => "already_processed",
            Self::Quarantined => "quarantined",
            Self::Unmapped => "unmapped",
            Self::Succeeded {
                ..
            } => "succeeded",
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Deterministic routing state machine.
pub struct RouterEngine {
    /// Audit trail used for the idempotency check and outcome rows.
    store: Arc<dyn AuditStore>,
    /// Object-storage copy backend.
    relocator: Arc<dyn ObjectRelocator>,
    /// Per-invocation routing-table loader.
    table_source: Arc<dyn RoutingTableSource>,
    /// Destination containers.
    containers: RouterContainers,
}

impl RouterEngine {
    /// Creates a routing engine over the given backends.
    #[must_use]
    pub fn new(
        store: Arc<dyn AuditStore>,
        relocator: Arc<dyn ObjectRelocator>,
        table_source: Arc<dyn RoutingTableSource>,
        containers: RouterContainers,
    ) -> Self {
        Self {
            store,
            relocator,
            table_source,
            containers,
        }
    }

    /// Routes one arrival event to a terminal disposition.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Structural`] for events missing required
    /// fields, and propagates routing-table, relocation, and audit-store
    /// faults. No audit row is committed on any error path.
    pub fn route(&self, event: &FileArrivalEvent) -> Result<RouteDisposition, RouterError> {
        if !event.is_structurally_valid() {
            return Err(RouterError::Structural(
                "file name and source container are required".to_string(),
            ));
        }
        if self.store.find_by_file_name(&event.file_name)?.is_some() {
            return Ok(RouteDisposition::AlreadyProcessed);
        }
        let Some(vendor) = event.vendor.as_deref().map(str::trim).filter(|v| !v.is_empty())
        else {
            return self.quarantine(event);
        };
        let table = self.table_source.load()?;
        let Some(rule) = table.resolve(vendor) else {
            return self.park_unmapped(event, vendor);
        };
        let destination_path = format!("{}/{}", rule.destination_folder, event.file_name);
        let started = Instant::now();
        self.relocator.copy(
            &event.source_container,
            &event.file_name,
            &self.containers.processed,
            &destination_path,
        )?;
        let elapsed_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.store.insert(NewAuditRecord {
            file_name: event.file_name.clone(),
            source_container: event.source_container.clone(),
            destination_container: self.containers.processed.clone(),
            status: AuditStatus::Success,
            error_message: None,
            processing_time_ms: Some(elapsed_ms),
        })?;
        Ok(RouteDisposition::Succeeded {
            destination_path,
        })
    }

    /// Relocates a vendor-less file to quarantine and records the outcome.
    fn quarantine(&self, event: &FileArrivalEvent) -> Result<RouteDisposition, RouterError> {
        self.relocator.copy(
            &event.source_container,
            &event.file_name,
            &self.containers.quarantine,
            &event.file_name,
        )?;
        self.store.insert(NewAuditRecord {
            file_name: event.file_name.clone(),
            source_container: event.source_container.clone(),
            destination_container: self.containers.quarantine.clone(),
            status: AuditStatus::FailedMetadata,
            error_message: Some("vendor metadata missing".to_string()),
            processing_time_ms: None,
        })?;
        Ok(RouteDisposition::Quarantined)
    }

    /// Relocates a rule-less file to the unmapped container and records it.
    fn park_unmapped(
        &self,
        event: &FileArrivalEvent,
        vendor: &str,
    ) -> Result<RouteDisposition, RouterError> {
        self.relocator.copy(
            &event.source_container,
            &event.file_name,
            &self.containers.unmapped,
            &event.file_name,
        )?;
        self.store.insert(NewAuditRecord {
            file_name: event.file_name.clone(),
            source_container: event.source_container.clone(),
            destination_container: self.containers.unmapped.clone(),
            status: AuditStatus::FailedConfig,
            error_message: Some(format!("no routing rule found for vendor '{vendor}'")),
            processing_time_ms: None,
        })?;
        Ok(RouteDisposition::Unmapped)
    }
}
