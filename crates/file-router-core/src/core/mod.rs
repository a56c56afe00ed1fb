// crates/file-router-core/src/core/mod.rs
// ============================================================================
// Module: File Router Core Types
// Description: Data model for arrival events, routing rules, and audit rows.
// Purpose: Group the core type modules behind one namespace.
// Dependencies: crate::core::{audit, event, routing}
// ============================================================================

//! ## Overview
//! Core types are plain data: the transient arrival event, the externally
//! maintained routing table, and the durable audit record. Behavior lives in
//! [`crate::runtime`]; persistence lives behind [`crate::interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod event;
pub mod routing;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ActivitySummary;
pub use audit::ActivityWindow;
pub use audit::AuditRecord;
pub use audit::AuditStatus;
pub use audit::DestinationCount;
pub use audit::NewAuditRecord;
pub use event::FileArrivalEvent;
pub use routing::RoutingRule;
pub use routing::RoutingTable;
pub use routing::RoutingTableError;
