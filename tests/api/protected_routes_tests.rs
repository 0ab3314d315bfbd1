//! Session Gate Tests
//!
//! Every business route answers 401 before touching storage or parsing the
//! body when no session is presented.

use axum::http::{header, HeaderValue, StatusCode};
use serde_json::json;
use test_case::test_case;

use crate::common::test_server;

#[test_case("/api/user" ; "current user")]
#[test_case("/api/dashboard/stats" ; "dashboard stats")]
#[test_case("/api/shipments/active" ; "active shipments")]
#[test_case("/api/vehicles/stats" ; "vehicle stats")]
#[test_case("/api/vehicles/maintenance-due" ; "maintenance due")]
#[test_case("/api/drivers/stats" ; "driver stats")]
#[test_case("/api/drivers/top" ; "top drivers")]
#[test_case("/api/activities?limit=5" ; "activities")]
#[test_case("/api/vehicles" ; "vehicles")]
#[test_case("/api/vehicles/1" ; "vehicle")]
#[test_case("/api/drivers" ; "drivers")]
#[test_case("/api/drivers/1" ; "driver")]
#[test_case("/api/shipments" ; "shipments")]
#[test_case("/api/shipments/1" ; "shipment")]
#[test_case("/api/clients" ; "clients")]
#[test_case("/api/clients/1" ; "client")]
#[test_case("/api/employees" ; "employees")]
#[test_case("/api/employees/1" ; "employee")]
#[test_case("/api/invoices" ; "invoices")]
#[test_case("/api/invoices/1" ; "invoice")]
#[test_case("/api/expenses" ; "expenses")]
#[tokio::test]
async fn test_get_requires_session(path: &str) {
    let server = test_server();

    let response = server.get(path).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "message": "Unauthorized" }));
}

#[test_case("/api/vehicles" ; "create vehicle")]
#[test_case("/api/vehicles/1/maintenance" ; "record maintenance")]
#[test_case("/api/drivers" ; "create driver")]
#[test_case("/api/shipments" ; "create shipment")]
#[test_case("/api/clients" ; "create client")]
#[test_case("/api/invoices" ; "create invoice")]
#[test_case("/api/invoices/1/pay" ; "pay invoice")]
#[test_case("/api/expenses" ; "create expense")]
#[tokio::test]
async fn test_post_requires_session(path: &str) {
    let server = test_server();

    // An invalid body must not leak a 400 ahead of the session check
    let response = server.post(path).json(&json!({})).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "message": "Unauthorized" }));
}

#[test_case("/api/vehicles/1/status" ; "vehicle status")]
#[test_case("/api/drivers/1/status" ; "driver status")]
#[test_case("/api/shipments/1/status" ; "shipment status")]
#[test_case("/api/shipments/1/assign" ; "assign shipment")]
#[tokio::test]
async fn test_patch_requires_session(path: &str) {
    let server = test_server();

    let response = server.patch(path).json(&json!({ "status": "active" })).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "message": "Unauthorized" }));
}

#[tokio::test]
async fn test_empty_session_cookie_is_rejected() {
    let server = test_server();

    let response = server
        .get("/api/dashboard/stats")
        .add_header(header::COOKIE, HeaderValue::from_static("sid="))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
