// crates/file-router-core/src/lib.rs
// ============================================================================
// Module: File Router Core Library
// Description: Public API surface for the File Router core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! File Router core provides the deterministic routing state machine and the
//! report aggregation logic shared by every deployment shape. It is
//! backend-agnostic and integrates with object storage, the audit datastore,
//! and the routing-table artifact through explicit interfaces rather than
//! embedding client crates.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AuditStore;
pub use interfaces::AuditStoreError;
pub use interfaces::ObjectRelocator;
pub use interfaces::RelocationError;
pub use interfaces::ReportSink;
pub use interfaces::ReportSinkError;
pub use interfaces::RoutingTableSource;
pub use runtime::InMemoryAuditStore;
pub use runtime::InMemoryReportSink;
pub use runtime::ReportAggregator;
pub use runtime::ReportError;
pub use runtime::ReportRun;
pub use runtime::RouteDisposition;
pub use runtime::RouterContainers;
pub use runtime::RouterEngine;
pub use runtime::RouterError;
pub use runtime::StaticRoutingTableSource;
