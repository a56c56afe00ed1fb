// crates/file-router-core/src/runtime/mod.rs
// ============================================================================
// Module: Runtime
// Description: Routing engine, report aggregator, and in-memory backends.
// Purpose: Group the behavioral modules behind one namespace.
// Dependencies: crate::runtime::{engine, memory, report}
// ============================================================================

//! ## Overview
//! Runtime modules hold the behavior of the system: the per-event routing
//! state machine, the on-demand report aggregator, and in-memory backend
//! implementations used by test suites and local development.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod engine;
pub mod memory;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::RouteDisposition;
pub use engine::RouterContainers;
pub use engine::RouterEngine;
pub use engine::RouterError;
pub use memory::InMemoryAuditStore;
pub use memory::InMemoryReportSink;
pub use memory::StaticRoutingTableSource;
pub use report::ReportAggregator;
pub use report::ReportError;
pub use report::ReportRun;
