//! Row builders for repository tests. Each returns the inserted id.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub async fn client(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO clients (name, phone, address) VALUES ($1, '0112345678', 'King Fahd Rd') RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn driver(pool: &PgPool, name: &str, status: &str, rating: Option<Decimal>) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO drivers (name, phone, license_number, license_expiry, status, rating)
        VALUES ($1, '0501234567', 'LIC-' || $1, NOW() + INTERVAL '1 year', $2::driver_status, $3)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(status)
    .bind(rating)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn vehicle(
    pool: &PgPool,
    plate: &str,
    status: &str,
    last_maintenance: Option<DateTime<Utc>>,
) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO vehicles (model, type, license_plate, status, last_maintenance_date)
        VALUES ('Volvo FH16', 'Heavy truck', $1, $2::vehicle_status, $3)
        RETURNING id
        "#,
    )
    .bind(plate)
    .bind(status)
    .bind(last_maintenance)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn employee(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO employees (name, position, phone) VALUES ($1, 'Accountant', '0551112222') RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Shipment created `age_minutes` ago in the given status.
pub async fn shipment(
    pool: &PgPool,
    client_id: i32,
    driver_id: Option<i32>,
    status: &str,
    age_minutes: i64,
) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO shipments (client_id, driver_id, origin, destination, status, created_at)
        VALUES ($1, $2, 'Riyadh', 'Dammam', $3::shipment_status, $4)
        RETURNING id
        "#,
    )
    .bind(client_id)
    .bind(driver_id)
    .bind(status)
    .bind(Utc::now() - Duration::minutes(age_minutes))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn driver_status(pool: &PgPool, driver_id: i32) -> String {
    sqlx::query_scalar("SELECT status::text FROM drivers WHERE id = $1")
        .bind(driver_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
