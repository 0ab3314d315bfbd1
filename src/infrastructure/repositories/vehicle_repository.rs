//! Vehicle Repository Implementation
//!
//! PostgreSQL implementation of the VehicleRepository trait, including the
//! maintenance_records child table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{
    MaintenanceRecord, NewMaintenanceRecord, NewVehicle, Page, Vehicle, VehicleRepository,
    VehicleStatus,
};
use crate::shared::error::AppError;

/// Database row for `vehicles`. `status` is selected as text.
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i32,
    model: String,
    #[sqlx(rename = "type")]
    vehicle_type: String,
    license_plate: String,
    status: String,
    manufacture_year: Option<i32>,
    last_maintenance_date: Option<DateTime<Utc>>,
    next_maintenance_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: self.id,
            model: self.model,
            vehicle_type: self.vehicle_type,
            license_plate: self.license_plate,
            status: VehicleStatus::parse(&self.status).unwrap_or_default(),
            manufacture_year: self.manufacture_year,
            last_maintenance_date: self.last_maintenance_date,
            next_maintenance_date: self.next_maintenance_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MaintenanceRow {
    id: i32,
    vehicle_id: i32,
    description: String,
    cost: Decimal,
    date: DateTime<Utc>,
    performed_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MaintenanceRow {
    fn into_record(self) -> MaintenanceRecord {
        MaintenanceRecord {
            id: self.id,
            vehicle_id: self.vehicle_id,
            description: self.description,
            cost: self.cost,
            date: self.date,
            performed_by: self.performed_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const VEHICLE_COLUMNS: &str = r#"id, model, type, license_plate, status::text AS status,
    manufacture_year, last_maintenance_date, next_maintenance_date, created_at, updated_at"#;

const MAINTENANCE_COLUMNS: &str =
    "id, vehicle_id, description, cost, date, performed_by, created_at, updated_at";

/// PostgreSQL vehicle repository implementation.
#[derive(Clone)]
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn count_by_status(&self, status: VehicleStatus) -> Result<i64, AppError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE status = $1::vehicle_status")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Ascending order puts never-serviced (NULL) vehicles last.
    async fn find_maintenance_candidates(&self, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE status = 'active'
            ORDER BY last_maintenance_date ASC, id ASC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_vehicle()).collect())
    }

    async fn list(&self, page: Page) -> Result<Vec<Vehicle>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_vehicle()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_vehicle()))
    }

    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (model, type, license_plate, status, manufacture_year,
                                  last_maintenance_date, next_maintenance_date)
            VALUES ($1, $2, $3, $4::vehicle_status, $5, $6, $7)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(&vehicle.model)
        .bind(&vehicle.vehicle_type)
        .bind(&vehicle.license_plate)
        .bind(vehicle.status.as_str())
        .bind(vehicle.manufacture_year)
        .bind(vehicle.last_maintenance_date)
        .bind(vehicle.next_maintenance_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "License plate already registered"))?;

        Ok(row.into_vehicle())
    }

    async fn update_status(
        &self,
        id: i32,
        status: VehicleStatus,
    ) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET status = $2::vehicle_status, updated_at = NOW()
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_vehicle()))
    }

    async fn record_maintenance(
        &self,
        vehicle_id: i32,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MaintenanceRow>(&format!(
            r#"
            INSERT INTO maintenance_records (vehicle_id, description, cost, date, performed_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MAINTENANCE_COLUMNS}
            "#
        ))
        .bind(vehicle_id)
        .bind(&record.description)
        .bind(record.cost)
        .bind(record.date)
        .bind(&record.performed_by)
        .fetch_one(&mut *tx)
        .await?;

        // GREATEST skips NULL, so a first service always sets the date and a
        // back-dated record never moves it backwards.
        sqlx::query(
            r#"
            UPDATE vehicles
            SET last_maintenance_date = GREATEST(last_maintenance_date, $2),
                next_maintenance_date = COALESCE($3, next_maintenance_date),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(vehicle_id)
        .bind(record.date)
        .bind(record.next_maintenance_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_record())
    }

    async fn maintenance_history(&self, vehicle_id: i32) -> Result<Vec<MaintenanceRecord>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(&format!(
            r#"
            SELECT {MAINTENANCE_COLUMNS}
            FROM maintenance_records
            WHERE vehicle_id = $1
            ORDER BY date DESC, id DESC
            "#
        ))
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }
}
