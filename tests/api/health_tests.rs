//! Health and Metrics Endpoint Tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::test_server;

#[tokio::test]
async fn test_health_check() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_liveness() {
    let server = test_server();

    let response = server.get("/health/live").await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "status": "alive" }));
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let server = test_server();

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["status"], "unhealthy");
    assert_eq!(body["database"]["message"], "Database unreachable");
}

#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let server = test_server();

    server.get("/health").await.assert_status_ok();
    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("shipping_erp_http_requests_total"));
    assert!(text.contains("path=\"/health\""));
}

#[tokio::test]
async fn test_security_headers_present() {
    let server = test_server();

    let response = server.get("/health").await;

    assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
    assert_eq!(response.header(header::X_FRAME_OPTIONS), "DENY");
    assert_eq!(response.header(header::REFERRER_POLICY), "no-referrer");
    // HSTS is production-only
    assert!(response
        .headers()
        .get(header::STRICT_TRANSPORT_SECURITY)
        .is_none());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = test_server();

    let response = server.get("/api/nope").await;

    // The session gate only wraps matched routes
    response.assert_status(StatusCode::NOT_FOUND);
}
