// crates/file-router-providers/tests/http_source.rs
// ============================================================================
// Module: HTTP Routing-Table Source Tests
// Description: Integration coverage over a local HTTP server.
// Purpose: Verify fetch limits, parse failures, and per-load freshness.
// Dependencies: file-router-core, file-router-providers, tiny_http
// ============================================================================

//! ## Overview
//! Exercises the HTTP routing-table source against a local single-shot
//! server, covering successful fetches, size-limit enforcement, parse
//! failures, and the per-load freshness of table edits.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions."
)]

use std::thread;

use file_router_core::RoutingTableError;
use file_router_core::RoutingTableSource;
use file_router_providers::HttpRoutingTableSource;
use file_router_providers::HttpSourceConfig;
use tiny_http::Response;
use tiny_http::Server;

/// Creates a source pointed at a local cleartext endpoint.
fn local_source(url: &str, max_response_bytes: usize) -> HttpRoutingTableSource {
    HttpRoutingTableSource::new(HttpSourceConfig {
        url: url.to_string(),
        allow_http: true,
        timeout_ms: 5_000,
        max_response_bytes,
        user_agent: "file-router-test/0.1".to_string(),
    })
    .expect("source")
}

/// Serves one response body and returns the endpoint URL.
fn serve_once(body: String) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("server");
    let addr = server.server_addr().to_ip().expect("addr");
    let url = format!("http://{addr}/routes.csv");
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::from_string(body));
        }
    });
    (url, handle)
}

#[test]
fn load_fetches_and_parses_the_artifact() {
    let (url, handle) =
        serve_once("vendor,destination_folder\nAcme,folder1\nGlobex,folder2\n".to_string());
    let source = local_source(&url, 1024);

    let table = source.load().expect("load");
    handle.join().expect("server thread");

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.resolve("acme").map(|rule| rule.destination_folder.as_str()),
        Some("folder1")
    );
}

#[test]
fn load_observes_artifact_edits_between_calls() {
    let server = Server::http("127.0.0.1:0").expect("server");
    let addr = server.server_addr().to_ip().expect("addr");
    let url = format!("http://{addr}/routes.csv");
    let handle = thread::spawn(move || {
        let bodies = [
            "vendor,destination_folder\nAcme,folder1\n",
            "vendor,destination_folder\nAcme,relocated\n",
        ];
        for body in bodies {
            if let Ok(request) = server.recv() {
                let _ = request.respond(Response::from_string(body));
            }
        }
    });

    let source = local_source(&url, 1024);
    let first = source.load().expect("first load");
    let second = source.load().expect("second load");
    handle.join().expect("server thread");

    assert_eq!(first.resolve("Acme").map(|rule| rule.destination_folder.as_str()), Some("folder1"));
    assert_eq!(
        second.resolve("Acme").map(|rule| rule.destination_folder.as_str()),
        Some("relocated")
    );
}

#[test]
fn non_success_status_is_a_fetch_fault() {
    let server = Server::http("127.0.0.1:0").expect("server");
    let addr = server.server_addr().to_ip().expect("addr");
    let url = format!("http://{addr}/routes.csv");
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::empty(503));
        }
    });

    let source = local_source(&url, 1024);
    let result = source.load();
    handle.join().expect("server thread");

    assert!(matches!(result, Err(RoutingTableError::Fetch(_))));
}

#[test]
fn oversize_artifact_fails_closed() {
    let mut body = "vendor,destination_folder\n".to_string();
    for index in 0 .. 200 {
        body.push_str(&format!("vendor-{index},folder-{index}\n"));
    }
    let (url, handle) = serve_once(body);

    let source = local_source(&url, 256);
    let result = source.load();
    handle.join().expect("server thread");

    assert!(matches!(result, Err(RoutingTableError::Fetch(_))));
}

#[test]
fn malformed_artifact_is_a_parse_fault() {
    let (url, handle) = serve_once("supplier,folder\nAcme,folder1\n".to_string());

    let source = local_source(&url, 1024);
    let result = source.load();
    handle.join().expect("server thread");

    assert!(matches!(result, Err(RoutingTableError::Parse(_))));
}
