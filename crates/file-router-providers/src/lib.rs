// crates/file-router-providers/src/lib.rs
// ============================================================================
// Module: File Router Providers
// Description: Routing-table source backends.
// Purpose: Expose the HTTP routing-table source.
// Dependencies: crate::http
// ============================================================================

//! ## Overview
//! Provider crates implement [`file_router_core::RoutingTableSource`] against
//! real transports. The HTTP source fetches the delimited routing artifact
//! from a configured endpoint with strict limits, fresh on every load.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::HttpRoutingTableSource;
pub use http::HttpSourceConfig;
