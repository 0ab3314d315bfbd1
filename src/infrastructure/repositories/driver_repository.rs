//! Driver Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{Driver, DriverAttendance, DriverRepository, DriverStatus, NewDriver, Page};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct DriverRow {
    id: i32,
    name: String,
    phone: String,
    license_number: String,
    license_expiry: DateTime<Utc>,
    status: String,
    rating: Option<Decimal>,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DriverRow {
    fn into_driver(self) -> Driver {
        Driver {
            id: self.id,
            name: self.name,
            phone: self.phone,
            license_number: self.license_number,
            license_expiry: self.license_expiry,
            status: DriverStatus::parse(&self.status).unwrap_or_default(),
            rating: self.rating,
            avatar: self.avatar,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: i32,
    driver_id: i32,
    check_in: DateTime<Utc>,
    check_out: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl AttendanceRow {
    fn into_attendance(self) -> DriverAttendance {
        DriverAttendance {
            id: self.id,
            driver_id: self.driver_id,
            check_in: self.check_in,
            check_out: self.check_out,
            created_at: self.created_at,
        }
    }
}

const DRIVER_COLUMNS: &str = r#"id, name, phone, license_number, license_expiry,
    status::text AS status, rating, avatar, created_at, updated_at"#;

/// PostgreSQL driver repository implementation.
#[derive(Clone)]
pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn count_by_status(&self, status: DriverStatus) -> Result<i64, AppError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM drivers WHERE status = $1::driver_status")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    async fn top_rated(&self, limit: i64) -> Result<Vec<Driver>, AppError> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            r#"
            SELECT {DRIVER_COLUMNS}
            FROM drivers
            ORDER BY rating DESC NULLS LAST, id ASC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_driver()).collect())
    }

    async fn list(&self, page: Page) -> Result<Vec<Driver>, AppError> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_driver()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_driver()))
    }

    async fn create(&self, driver: &NewDriver) -> Result<Driver, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            r#"
            INSERT INTO drivers (name, phone, license_number, license_expiry, status, rating, avatar)
            VALUES ($1, $2, $3, $4, $5::driver_status, COALESCE($6, 5.0), $7)
            RETURNING {DRIVER_COLUMNS}
            "#
        ))
        .bind(&driver.name)
        .bind(&driver.phone)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.status.as_str())
        .bind(driver.rating)
        .bind(&driver.avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "License number already registered"))?;

        Ok(row.into_driver())
    }

    async fn update_status(&self, id: i32, status: DriverStatus) -> Result<Option<Driver>, AppError> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            r#"
            UPDATE drivers
            SET status = $2::driver_status, updated_at = NOW()
            WHERE id = $1
            RETURNING {DRIVER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_driver()))
    }

    async fn attendance(&self, driver_id: i32) -> Result<Vec<DriverAttendance>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, driver_id, check_in, check_out, created_at
            FROM driver_attendance
            WHERE driver_id = $1
            ORDER BY check_in DESC
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_attendance()).collect())
    }
}
