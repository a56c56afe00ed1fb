// crates/file-router-server/tests/config.rs
// ============================================================================
// Module: Configuration Loading Tests
// Description: Integration tests for TOML configuration loading.
// Purpose: Verify resolution, parsing, and fail-closed validation from disk.
// Dependencies: file-router-server, tempfile
// ============================================================================

//! ## Overview
//! Loads configuration files from a temporary directory and verifies that
//! well-formed files produce a validated configuration while malformed or
//! incomplete files fail closed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use std::fs;
use std::path::PathBuf;

use file_router_server::ConfigError;
use file_router_server::FileRouterConfig;
use tempfile::TempDir;

/// Writes a config file into a fresh temp dir and returns both.
fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("file-router.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

/// A complete, valid configuration file.
const VALID_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:9090"
max_body_bytes = 32768

[containers]
processed = "vendor-processed"
quarantine = "vendor-quarantine"
unmapped = "vendor-unmapped"

[routing_table]
url = "https://config.example.com/routing.csv"

[store]
connection = "postgres://router:router@db/router"
max_connections = 8

[storage]
region = "us-east-1"

[report]
bucket = "vendor-reports"
"#;

#[test]
fn valid_file_loads_with_explicit_settings() {
    let (_dir, path) = write_config(VALID_CONFIG);
    let config = FileRouterConfig::load(Some(&path)).expect("load");
    assert_eq!(config.server.bind, "127.0.0.1:9090");
    assert_eq!(config.server.max_body_bytes, 32_768);
    assert_eq!(config.containers.processed, "vendor-processed");
    assert_eq!(config.routing_table.url, "https://config.example.com/routing.csv");
    assert_eq!(config.store.max_connections, 8);
    assert_eq!(config.storage.region.as_deref(), Some("us-east-1"));
    assert_eq!(config.report.bucket, "vendor-reports");
}

#[test]
fn omitted_sections_fall_back_to_defaults() {
    let minimal = r#"
[containers]
processed = "vendor-processed"
quarantine = "vendor-quarantine"
unmapped = "vendor-unmapped"

[routing_table]
url = "https://config.example.com/routing.csv"

[report]
bucket = "vendor-reports"
"#;
    let (_dir, path) = write_config(minimal);
    let config = FileRouterConfig::load(Some(&path)).expect("load");
    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.server.max_body_bytes, 64 * 1024);
    assert_eq!(config.store.max_connections, 16);
    assert!(config.storage.region.is_none());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");
    assert!(matches!(FileRouterConfig::load(Some(&path)), Err(ConfigError::Io(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let (_dir, path) = write_config("[containers\nprocessed = ");
    assert!(matches!(FileRouterConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_required_section_is_a_parse_error() {
    let (_dir, path) = write_config(
        r#"
[containers]
processed = "vendor-processed"
quarantine = "vendor-quarantine"
unmapped = "vendor-unmapped"
"#,
    );
    assert!(matches!(FileRouterConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn invalid_bind_address_fails_validation() {
    let invalid = VALID_CONFIG.replace("127.0.0.1:9090", "nowhere");
    let (_dir, path) = write_config(&invalid);
    assert!(matches!(FileRouterConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}

#[test]
fn blank_report_bucket_fails_validation() {
    let invalid = VALID_CONFIG.replace("vendor-reports", "  ");
    let (_dir, path) = write_config(&invalid);
    assert!(matches!(FileRouterConfig::load(Some(&path)), Err(ConfigError::Invalid(_))));
}
