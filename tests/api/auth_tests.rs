//! Authentication API Tests
//!
//! Validation runs before any storage call, so these requests are answered
//! without a database.

use axum::http::{header, HeaderValue, StatusCode};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::Fake;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{test_server, COOKIE_NAME};

#[tokio::test]
async fn test_register_with_short_username_fails() {
    let server = test_server();

    let response = server
        .post("/api/register")
        .json(&json!({ "username": "a", "password": "secret123" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "username");
    assert_eq!(
        body["message"],
        "username: Username must be at least 2 characters"
    );
}

#[tokio::test]
async fn test_register_with_short_password_fails() {
    let server = test_server();
    let username: String = Username().fake();

    let response = server
        .post("/api/register")
        .json(&json!({ "username": username, "password": "12345" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_register_with_invalid_email_fails() {
    let server = test_server();

    let response = server
        .post("/api/register")
        .json(&json!({
            "username": "dispatcher",
            "password": "secret123",
            "email": "not-an-email"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let server = test_server();
    let email: String = SafeEmail().fake();

    let response = server
        .post("/api/register")
        .json(&json!({ "username": "x", "password": "1", "email": email }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["password", "username"]);
}

#[tokio::test]
async fn test_register_with_malformed_json_is_bad_request() {
    let server = test_server();

    let response = server
        .post("/api/register")
        .text("{\"username\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_login_with_empty_password_fails() {
    let server = test_server();

    let response = server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_current_user_requires_session() {
    let server = test_server();

    let response = server.get("/api/user").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "message": "Unauthorized" }));
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let server = test_server();

    let response = server.post("/api/logout").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Logged out" }));
}

#[tokio::test]
async fn test_logout_clears_session_cookie_even_when_store_is_down() {
    let server = test_server();

    let response = server
        .post("/api/logout")
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}=stale-token", COOKIE_NAME)).unwrap(),
        )
        .await;

    response.assert_status_ok();
    let set_cookie = response.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{}=;", COOKIE_NAME)));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_non_bearer_authorization_is_rejected() {
    let server = test_server();

    let response = server
        .get("/api/user")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic YWRtaW46YWRtaW4xMjM="),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
