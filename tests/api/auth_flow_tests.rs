//! Authentication flow against a real database.

use axum::http::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing_subscriber::layer::SubscriberExt;

use crate::common::{db_server, EventLog, COOKIE_NAME};

#[sqlx::test]
async fn test_register_login_and_fetch_user(pool: PgPool) {
    let server = db_server(pool);

    let registered = server
        .post("/api/register")
        .json(&json!({ "username": "noura", "password": "secret123", "fullName": "Noura Saleh" }))
        .await;
    registered.assert_status(StatusCode::CREATED);

    let login = server
        .post("/api/login")
        .json(&json!({ "username": "noura", "password": "secret123" }))
        .await;
    login.assert_status_ok();
    let session = login.cookie(COOKIE_NAME);

    let me = server.get("/api/user").add_cookie(session).await;
    me.assert_status_ok();
    let body: Value = me.json();
    assert_eq!(body["username"], "noura");
    assert!(body.get("password").is_none());
}

#[sqlx::test]
async fn test_register_and_login_are_logged_once(pool: PgPool) {
    let log = EventLog::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));
    let server = db_server(pool);

    server
        .post("/api/register")
        .json(&json!({ "username": "dispatch", "password": "secret123" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/login")
        .json(&json!({ "username": "dispatch", "password": "secret123" }))
        .await
        .assert_status_ok();

    assert_eq!(log.count("User registered"), 1);
    assert_eq!(log.count("User logged in"), 1);
}
