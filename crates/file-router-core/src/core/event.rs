// crates/file-router-core/src/core/event.rs
// ============================================================================
// Module: File Arrival Event
// Description: Transient representation of one file-arrival notification.
// Purpose: Carry the decoded event fields into the routing state machine.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`FileArrivalEvent`] is constructed once per invocation from the inbound
//! arrival notification and never persisted. A missing vendor is a valid,
//! meaningful state (it routes the file to quarantine); missing name or
//! source container is a structural fault handled by the engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Event Type
// ============================================================================

/// One decoded file-arrival notification.
///
/// # Invariants
/// - `vendor` is `None` when the notification carried no vendor metadata;
///   the distinction between absent and empty is not preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArrivalEvent {
    /// Name of the object that arrived.
    pub file_name: String,
    /// Container the object arrived in.
    pub source_container: String,
    /// Vendor metadata value, when present.
    pub vendor: Option<String>,
}

impl FileArrivalEvent {
    /// Creates a new arrival event.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        source_container: impl Into<String>,
        vendor: Option<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            source_container: source_container.into(),
            vendor,
        }
    }

    /// Returns true when both structural fields are non-empty.
    #[must_use]
    pub fn is_structurally_valid(&self) -> bool {
        !self.file_name.trim().is_empty() && !self.source_container.trim().is_empty()
    }
}
