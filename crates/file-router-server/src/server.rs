// crates/file-router-server/src/server.rs
// ============================================================================
// Module: Router Server
// Description: HTTP endpoint exposing routing and report generation.
// Purpose: Wire production backends into the engine and serve requests.
// Dependencies: file-router-core, axum, tokio
// ============================================================================

//! ## Overview
//! The server exposes two operations: `POST /events` routes one file-arrival
//! notification to a terminal disposition, and `POST /report` generates one
//! trailing-window activity report. Business outcomes return `200` so the
//! invoking platform treats the delivery as consumed; a structurally invalid
//! notification returns `400`; system faults return `500` with an opaque
//! body so the event is redelivered and retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use file_router_core::ActivitySummary;
use file_router_core::AuditStore;
use file_router_core::DestinationCount;
use file_router_core::FileArrivalEvent;
use file_router_core::ObjectRelocator;
use file_router_core::ReportAggregator;
use file_router_core::RouteDisposition;
use file_router_core::RouterContainers;
use file_router_core::RouterEngine;
use file_router_core::RouterError;
use file_router_providers::HttpRoutingTableSource;
use file_router_storage_s3::S3ObjectStorage;
use file_router_storage_s3::S3ReportSink;
use file_router_store_postgres::shared_postgres_store;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::config::FileRouterConfig;
use crate::decision_log::DecisionLogSink;
use crate::decision_log::FileDecisionLogSink;
use crate::decision_log::ReportLogEvent;
use crate::decision_log::RouteFaultEvent;
use crate::decision_log::RouteLogEvent;
use crate::decision_log::StderrDecisionLogSink;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Router server errors.
#[derive(Debug, Error)]
pub enum RouterServerError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization error.
    #[error("init error: {0}")]
    Init(String),
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Router server instance.
pub struct RouterServer {
    /// Bind address for the HTTP listener.
    bind: String,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl RouterServer {
    /// Builds a new router server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterServerError`] when initialization fails.
    pub fn from_config(config: FileRouterConfig) -> Result<Self, RouterServerError> {
        config.validate().map_err(|err| RouterServerError::Config(err.to_string()))?;
        let store = shared_postgres_store(&config.store)
            .map_err(|err| RouterServerError::Init(err.to_string()))?;
        let storage = Arc::new(
            S3ObjectStorage::new(&config.storage)
                .map_err(|err| RouterServerError::Init(err.to_string()))?,
        );
        let report_sink = S3ReportSink::new(Arc::clone(&storage), &config.report.bucket)
            .map_err(|err| RouterServerError::Init(err.to_string()))?;
        let table_source = HttpRoutingTableSource::new(config.routing_table.clone())
            .map_err(|err| RouterServerError::Init(err.to_string()))?;
        let log: Arc<dyn DecisionLogSink> = match &config.server.log_file {
            Some(path) => Arc::new(
                FileDecisionLogSink::new(path)
                    .map_err(|err| RouterServerError::Init(err.to_string()))?,
            ),
            None => Arc::new(StderrDecisionLogSink),
        };
        let containers = RouterContainers {
            processed: config.containers.processed.clone(),
            quarantine: config.containers.quarantine.clone(),
            unmapped: config.containers.unmapped.clone(),
        };
        let engine = RouterEngine::new(
            Arc::clone(&store) as Arc<dyn AuditStore>,
            storage as Arc<dyn ObjectRelocator>,
            Arc::new(table_source),
            containers,
        );
        let aggregator =
            ReportAggregator::new(store as Arc<dyn AuditStore>, Arc::new(report_sink));
        Ok(Self {
            bind: config.server.bind.clone(),
            state: Arc::new(ServerState {
                engine,
                aggregator,
                log,
                max_body_bytes: config.server.max_body_bytes,
            }),
        })
    }

    /// Serves requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`RouterServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), RouterServerError> {
        let addr: SocketAddr = self
            .bind
            .parse()
            .map_err(|_| RouterServerError::Config("invalid bind address".to_string()))?;
        let app = Router::new()
            .route("/events", post(handle_event))
            .route("/report", post(handle_report))
            .with_state(self.state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| RouterServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| RouterServerError::Transport("http server failed".to_string()))
    }
}

/// Shared server state for HTTP handlers.
struct ServerState {
    /// Routing state machine over production backends.
    engine: RouterEngine,
    /// Trailing-window report aggregator.
    aggregator: ReportAggregator,
    /// Decision log sink.
    log: Arc<dyn DecisionLogSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Inbound file-arrival notification payload.
///
/// Structural fields are optional at the wire level so an incomplete
/// notification reaches the engine and is rejected there with a uniform
/// structural fault. The vendor is one key in an open metadata map.
#[derive(Debug, Deserialize)]
struct ArrivalNotification {
    /// Name of the object that arrived.
    file_name: Option<String>,
    /// Container the object arrived in.
    source_container: Option<String>,
    /// Object metadata carried with the notification.
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

impl ArrivalNotification {
    /// Returns the vendor metadata value, when present.
    fn vendor(&self) -> Option<String> {
        self.metadata.get("vendor").cloned()
    }
}

/// Response payload for the events endpoint.
#[derive(Debug, Serialize)]
struct EventResponse {
    /// Request outcome label.
    status: &'static str,
    /// Terminal disposition label for processed events.
    #[serde(skip_serializing_if = "Option::is_none")]
    disposition: Option<&'static str>,
    /// Destination path for successful routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_path: Option<String>,
    /// Error detail for rejected or failed requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Response payload for the report endpoint.
#[derive(Debug, Serialize)]
struct ReportResponse {
    /// Outcome message; opaque on failure.
    message: &'static str,
    /// Unique timestamped artifact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    unique_file: Option<String>,
    /// Hour-scoped latest artifact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_file: Option<String>,
    /// Window summary counters.
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ActivitySummary>,
    /// Per-destination window counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<Vec<DestinationCount>>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles one file-arrival notification.
async fn handle_event(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    bytes: Bytes,
) -> impl IntoResponse {
    if bytes.len() > state.max_body_bytes {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            axum::Json(EventResponse {
                status: "rejected",
                disposition: None,
                destination_path: None,
                error: Some("request body exceeds size limit".to_string()),
            }),
        );
    }
    let peer_ip = Some(peer.ip().to_string());
    let response = tokio::task::block_in_place(|| process_event(&state, peer_ip, &bytes));
    (response.0, axum::Json(response.1))
}

/// Handles one report generation request.
async fn handle_report(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let response = tokio::task::block_in_place(|| process_report(&state));
    (response.0, axum::Json(response.1))
}

/// Routes one decoded notification to a terminal outcome and status code.
fn process_event(
    state: &ServerState,
    peer_ip: Option<String>,
    bytes: &[u8],
) -> (StatusCode, EventResponse) {
    let Ok(notification) = serde_json::from_slice::<ArrivalNotification>(bytes) else {
        state.log.record_fault(&RouteFaultEvent::new(
            peer_ip,
            None,
            "structural",
            "invalid notification payload".to_string(),
        ));
        return (
            StatusCode::BAD_REQUEST,
            EventResponse {
                status: "rejected",
                disposition: None,
                destination_path: None,
                error: Some("invalid notification payload".to_string()),
            },
        );
    };
    let vendor = notification.vendor();
    let event = FileArrivalEvent::new(
        notification.file_name.unwrap_or_default(),
        notification.source_container.unwrap_or_default(),
        vendor,
    );
    match state.engine.route(&event) {
        Ok(disposition) => {
            let destination_path = match &disposition {
                RouteDisposition::Succeeded {
                    destination_path,
                } => Some(destination_path.clone()),
                _ => None,
            };
            state.log.record_route(&RouteLogEvent::new(
                peer_ip,
                event.file_name.clone(),
                event.source_container.clone(),
                disposition.label(),
                destination_path.clone(),
            ));
            (
                StatusCode::OK,
                EventResponse {
                    status: "processed",
                    disposition: Some(disposition.label()),
                    destination_path,
                    error: None,
                },
            )
        }
        Err(RouterError::Structural(message)) => {
            state.log.record_fault(&RouteFaultEvent::new(
                peer_ip,
                Some(event.file_name),
                "structural",
                message.clone(),
            ));
            (
                StatusCode::BAD_REQUEST,
                EventResponse {
                    status: "rejected",
                    disposition: None,
                    destination_path: None,
                    error: Some(message),
                },
            )
        }
        Err(err) => {
            state.log.record_fault(&RouteFaultEvent::new(
                peer_ip,
                Some(event.file_name),
                "system",
                err.to_string(),
            ));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                EventResponse {
                    status: "error",
                    disposition: None,
                    destination_path: None,
                    error: Some("internal routing failure".to_string()),
                },
            )
        }
    }
}

/// Generates one report and maps the outcome to a status code.
fn process_report(state: &ServerState) -> (StatusCode, ReportResponse) {
    match state.aggregator.run() {
        Ok(run) => {
            state.log.record_report(&ReportLogEvent::new(
                run.unique_name.clone(),
                run.latest_name.clone(),
                run.window.summary.total_files,
                run.window.summary.success_count,
                run.window.summary.failure_count,
            ));
            (
                StatusCode::OK,
                ReportResponse {
                    message: "report generated",
                    unique_file: Some(run.unique_name),
                    latest_file: Some(run.latest_name),
                    summary: Some(run.window.summary),
                    breakdown: Some(run.window.breakdown),
                },
            )
        }
        Err(err) => {
            state.log.record_fault(&RouteFaultEvent::new(None, None, "report", err.to_string()));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ReportResponse {
                    message: "report generation failed",
                    unique_file: None,
                    latest_file: None,
                    summary: None,
                    breakdown: None,
                },
            )
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use std::sync::Arc;

    use axum::http::StatusCode;
    use file_router_core::AuditStore;
    use file_router_core::InMemoryAuditStore;
    use file_router_core::InMemoryReportSink;
    use file_router_core::ObjectRelocator;
    use file_router_core::RelocationError;
    use file_router_core::ReportAggregator;
    use file_router_core::RouterContainers;
    use file_router_core::RouterEngine;
    use file_router_core::RoutingTable;
    use file_router_core::StaticRoutingTableSource;

    use super::ServerState;
    use super::process_event;
    use super::process_report;
    use crate::decision_log::NoopDecisionLogSink;

    /// Relocator stub that accepts every copy.
    struct NullRelocator;

    impl ObjectRelocator for NullRelocator {
        fn copy(
            &self,
            _source_container: &str,
            _file_name: &str,
            _destination_container: &str,
            _destination_path: &str,
        ) -> Result<(), RelocationError> {
            Ok(())
        }
    }

    fn state() -> (ServerState, Arc<InMemoryReportSink>) {
        let store = Arc::new(InMemoryAuditStore::new());
        let sink = Arc::new(InMemoryReportSink::new());
        let table =
            RoutingTable::parse("vendor,destination_folder\nAcme,folder1\n").unwrap();
        let engine = RouterEngine::new(
            Arc::clone(&store) as Arc<dyn AuditStore>,
            Arc::new(NullRelocator),
            Arc::new(StaticRoutingTableSource::new(table)),
            RouterContainers {
                processed: "vendor-processed".to_string(),
                quarantine: "vendor-quarantine".to_string(),
                unmapped: "vendor-unmapped".to_string(),
            },
        );
        let aggregator = ReportAggregator::new(
            store as Arc<dyn AuditStore>,
            Arc::clone(&sink) as Arc<dyn file_router_core::ReportSink>,
        );
        (
            ServerState {
                engine,
                aggregator,
                log: Arc::new(NoopDecisionLogSink),
                max_body_bytes: 64 * 1024,
            },
            sink,
        )
    }

    #[test]
    fn mapped_notification_is_processed_with_destination_path() {
        let (state, _sink) = state();
        let body = br#"{"file_name":"a.csv","source_container":"vendor-inbound","metadata":{"vendor":"Acme"}}"#;
        let (status, response) = process_event(&state, None, body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "processed");
        assert_eq!(response.disposition, Some("succeeded"));
        assert_eq!(response.destination_path.as_deref(), Some("folder1/a.csv"));
    }

    #[test]
    fn unmatched_vendor_is_a_processed_business_outcome() {
        let (state, _sink) = state();
        let body =
            br#"{"file_name":"b.csv","source_container":"vendor-inbound","metadata":{"vendor":"Initech"}}"#;
        let (status, response) = process_event(&state, None, body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.disposition, Some("unmapped"));
        assert!(response.destination_path.is_none());
    }

    #[test]
    fn missing_structural_field_is_rejected() {
        let (state, _sink) = state();
        let body = br#"{"metadata":{"vendor":"Acme"}}"#;
        let (status, response) = process_event(&state, None, body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.status, "rejected");
        assert!(response.error.is_some());
    }

    #[test]
    fn undecodable_body_is_rejected() {
        let (state, _sink) = state();
        let (status, response) = process_event(&state, None, b"not json");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.status, "rejected");
    }

    #[test]
    fn redelivered_notification_short_circuits() {
        let (state, _sink) = state();
        let body = br#"{"file_name":"a.csv","source_container":"vendor-inbound","metadata":{"vendor":"Acme"}}"#;
        let (first, _) = process_event(&state, None, body);
        let (second, response) = process_event(&state, None, body);
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);
        assert_eq!(response.disposition, Some("already_processed"));
    }

    #[test]
    fn report_run_returns_both_artifact_names() {
        let (state, sink) = state();
        let body = br#"{"file_name":"a.csv","source_container":"vendor-inbound","metadata":{"vendor":"Acme"}}"#;
        let (status, _) = process_event(&state, None, body);
        assert_eq!(status, StatusCode::OK);
        let (status, response) = process_report(&state);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.message, "report generated");
        let unique = response.unique_file.unwrap();
        let latest = response.latest_file.unwrap();
        assert!(unique.starts_with("report-"));
        assert!(latest.ends_with("-latest.csv"));
        let names = sink.names().unwrap();
        assert!(names.contains(&unique));
        assert!(names.contains(&latest));
        assert_eq!(response.summary.unwrap().total_files, 1);
    }
}
