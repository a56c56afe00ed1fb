// crates/file-router-storage-s3/src/lib.rs
// ============================================================================
// Module: File Router S3 Storage
// Description: S3-compatible object storage backends.
// Purpose: Expose the object relocator and report sink over S3.
// Dependencies: crate::object_store
// ============================================================================

//! ## Overview
//! Object storage access for relocating arrived files between containers and
//! publishing report artifacts. Buckets are the container abstraction; an
//! S3-compatible endpoint (MinIO and friends) is supported through the
//! endpoint and path-style settings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod object_store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use object_store::S3ObjectStorage;
pub use object_store::S3ReportSink;
pub use object_store::S3StorageConfig;
pub use object_store::S3StorageError;
