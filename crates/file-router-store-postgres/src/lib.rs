// crates/file-router-store-postgres/src/lib.rs
// ============================================================================
// Module: File Router Postgres Store
// Description: Postgres-backed audit trail storage.
// Purpose: Expose the pooled Postgres audit store.
// Dependencies: crate::postgres_store
// ============================================================================

//! ## Overview
//! Durable audit-trail storage on Postgres behind an r2d2 connection pool.
//! The pool is created once per process and shared across invocations; the
//! schema is migrated on first connection.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod postgres_store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use postgres_store::PostgresAuditStore;
pub use postgres_store::PostgresStoreConfig;
pub use postgres_store::PostgresStoreError;
pub use postgres_store::shared_postgres_store;
