// crates/file-router-storage-s3/src/object_store.rs
// ============================================================================
// Module: S3 Object Storage
// Description: S3-backed object relocation and report publication.
// Purpose: Copy arrived files between buckets and write report artifacts.
// Dependencies: aws-config, aws-sdk-s3, file-router-core, tokio
// ============================================================================

//! ## Overview
//! The storage handle owns its own multi-thread Tokio runtime so the
//! synchronous routing path can drive async SDK calls without borrowing the
//! server's runtime. Relocation is a server-side `CopyObject`; the source
//! object is left in place and an existing destination object is replaced.
//! Report artifacts are `PutObject` uploads with a `text/csv` content type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_s3::Client;
use file_router_core::ObjectRelocator;
use file_router_core::RelocationError;
use file_router_core::ReportSink;
use file_router_core::ReportSinkError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tokio::runtime::Runtime;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for S3-compatible object storage access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// AWS region (optional; falls back to environment configuration).
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint URL (for S3-compatible stores).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Force path-style addressing (for S3-compatible stores).
    #[serde(default)]
    pub force_path_style: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// S3 storage errors.
#[derive(Debug, Error)]
pub enum S3StorageError {
    /// Configuration is invalid.
    #[error("s3 storage invalid config: {0}")]
    Invalid(String),
    /// An S3 operation or runtime setup failed.
    #[error("s3 storage io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Storage Handle
// ============================================================================

/// S3-backed object storage handle.
///
/// # Invariants
/// - Relocation copies; it never deletes the source object.
pub struct S3ObjectStorage {
    /// S3 client handle.
    client: Client,
    /// Tokio runtime for blocking S3 calls.
    runtime: Option<Arc<Runtime>>,
}

impl Drop for S3ObjectStorage {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let _ = std::thread::spawn(move || drop(runtime));
        }
    }
}

impl S3ObjectStorage {
    /// Creates a new object storage handle.
    ///
    /// # Errors
    ///
    /// Returns [`S3StorageError`] when the runtime or client cannot be built.
    pub fn new(config: &S3StorageConfig) -> Result<Self, S3StorageError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| S3StorageError::Io(err.to_string()))?;
        let shared_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = &config.region {
                loader = loader.region(Region::new(region.clone()));
            }
            if let Some(endpoint) = &config.endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            loader.load().await
        });
        let mut s3_builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if config.force_path_style {
            s3_builder = s3_builder.force_path_style(true);
        }
        let client = Client::from_conf(s3_builder.build());
        Ok(Self {
            client,
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// Uploads a text object, replacing any existing object at the key.
    fn put_text(
        &self,
        bucket: &str,
        key: &str,
        contents: &str,
        content_type: &str,
    ) -> Result<(), S3StorageError> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();
        let body = aws_sdk_s3::primitives::ByteStream::from(contents.as_bytes().to_vec());
        let content_type = content_type.to_string();
        self.runtime
            .as_ref()
            .ok_or_else(|| S3StorageError::Io("s3 storage closed".to_string()))?
            .block_on(async {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(body)
                    .content_type(content_type)
                    .send()
                    .await
                    .map_err(|err| S3StorageError::Io(err.to_string()))?;
                Ok(())
            })
    }
}

impl ObjectRelocator for S3ObjectStorage {
    fn copy(
        &self,
        source_container: &str,
        file_name: &str,
        destination_container: &str,
        destination_path: &str,
    ) -> Result<(), RelocationError> {
        let client = self.client.clone();
        let copy_source = encode_copy_source(source_container, file_name);
        let destination_container = destination_container.to_string();
        let destination_path = destination_path.to_string();
        self.runtime
            .as_ref()
            .ok_or_else(|| RelocationError::Copy("s3 storage closed".to_string()))?
            .block_on(async {
                client
                    .copy_object()
                    .copy_source(copy_source)
                    .bucket(destination_container)
                    .key(destination_path)
                    .send()
                    .await
                    .map_err(|err| RelocationError::Copy(err.to_string()))?;
                Ok(())
            })
    }
}

// ============================================================================
// SECTION: Report Sink
// ============================================================================

/// Report sink that uploads artifacts into a dedicated bucket.
pub struct S3ReportSink {
    /// Shared storage handle.
    storage: Arc<S3ObjectStorage>,
    /// Bucket receiving report artifacts.
    bucket: String,
}

impl S3ReportSink {
    /// Creates a report sink over a storage handle and bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3StorageError::Invalid`] when the bucket name is empty.
    pub fn new(storage: Arc<S3ObjectStorage>, bucket: &str) -> Result<Self, S3StorageError> {
        if bucket.trim().is_empty() {
            return Err(S3StorageError::Invalid("report bucket must be set".to_string()));
        }
        Ok(Self {
            storage,
            bucket: bucket.to_string(),
        })
    }
}

impl ReportSink for S3ReportSink {
    fn put_report(&self, name: &str, contents: &str) -> Result<(), ReportSinkError> {
        self.storage
            .put_text(&self.bucket, name, contents, "text/csv")
            .map_err(|err| ReportSinkError::Write(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the URL-encoded `CopyObject` source for a bucket and key.
///
/// Path separators inside the key are preserved; every other byte outside
/// the unreserved set is percent-encoded.
fn encode_copy_source(bucket: &str, key: &str) -> String {
    let mut out = String::with_capacity(bucket.len() + key.len() + 1);
    out.push_str(bucket);
    out.push('/');
    for byte in key.bytes() {
        match byte {
            b'A' ..= b'Z' | b'a' ..= b'z' | b'0' ..= b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(char::from(byte));
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
