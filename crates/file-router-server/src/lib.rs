// crates/file-router-server/src/lib.rs
// ============================================================================
// Module: File Router Server Library
// Description: Service wiring, configuration, and HTTP transport.
// Purpose: Expose the router server and its configuration surface.
// Dependencies: crate::{config, decision_log, server}
// ============================================================================

//! ## Overview
//! The server crate assembles the routing engine and the report aggregator
//! over their production backends (Postgres audit trail, S3 object storage,
//! HTTP routing-table artifact) and exposes both behind an HTTP endpoint.
//! Each request runs one routing decision or one report generation to a
//! terminal outcome; the invoking platform handles retry by redelivery.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod decision_log;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::FileRouterConfig;
pub use decision_log::DecisionLogSink;
pub use decision_log::FileDecisionLogSink;
pub use decision_log::NoopDecisionLogSink;
pub use decision_log::StderrDecisionLogSink;
pub use server::RouterServer;
pub use server::RouterServerError;
