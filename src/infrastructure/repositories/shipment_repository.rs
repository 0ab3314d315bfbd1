//! Shipment Repository Implementation
//!
//! Joins clients and drivers for the list views and keeps the driver's
//! availability in step with dispatch and completion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{
    AssignOutcome, DriverStatus, NewShipment, Page, Shipment, ShipmentRepository, ShipmentStatus,
    ShipmentSummary, StatusTransition,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ShipmentRow {
    id: i32,
    client_id: i32,
    driver_id: Option<i32>,
    vehicle_id: Option<i32>,
    origin: String,
    destination: String,
    status: String,
    weight: Option<Decimal>,
    description: Option<String>,
    delivery_date: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    proof_of_delivery: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ShipmentRow {
    fn into_shipment(self) -> Shipment {
        Shipment {
            id: self.id,
            client_id: self.client_id,
            driver_id: self.driver_id,
            vehicle_id: self.vehicle_id,
            origin: self.origin,
            destination: self.destination,
            status: ShipmentStatus::parse(&self.status).unwrap_or_default(),
            weight: self.weight,
            description: self.description,
            delivery_date: self.delivery_date,
            delivered_at: self.delivered_at,
            proof_of_delivery: self.proof_of_delivery,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Shipment row plus joined names.
#[derive(Debug, sqlx::FromRow)]
struct ShipmentSummaryRow {
    #[sqlx(flatten)]
    shipment: ShipmentRow,
    client_name: String,
    driver_name: String,
}

impl ShipmentSummaryRow {
    fn into_summary(self) -> ShipmentSummary {
        ShipmentSummary {
            shipment: self.shipment.into_shipment(),
            client_name: self.client_name,
            driver_name: self.driver_name,
        }
    }
}

const SHIPMENT_COLUMNS: &str = r#"id, client_id, driver_id, vehicle_id, origin, destination,
    status::text AS status, weight, description, delivery_date, delivered_at,
    proof_of_delivery, created_at, updated_at"#;

const SUMMARY_SELECT: &str = r#"
    SELECT s.id, s.client_id, s.driver_id, s.vehicle_id, s.origin, s.destination,
           s.status::text AS status, s.weight, s.description, s.delivery_date,
           s.delivered_at, s.proof_of_delivery, s.created_at, s.updated_at,
           COALESCE(c.name, '') AS client_name,
           COALESCE(d.name, '') AS driver_name
    FROM shipments s
    LEFT JOIN clients c ON c.id = s.client_id
    LEFT JOIN drivers d ON d.id = s.driver_id
"#;

const SHIPMENT_REFERENCES: &[(&str, &str)] = &[
    ("shipments_client_id_fkey", "Client not found"),
    ("shipments_driver_id_fkey", "Driver not found"),
    ("shipments_vehicle_id_fkey", "Vehicle not found"),
];

/// Frees a driver once they hold no open shipment.
const RELEASE_DRIVER: &str = r#"
    UPDATE drivers
    SET status = 'available', updated_at = NOW()
    WHERE id = $1
      AND status = 'on_mission'
      AND NOT EXISTS (
          SELECT 1 FROM shipments
          WHERE driver_id = $1 AND status IN ('pending', 'in_transit')
      )
"#;

/// PostgreSQL shipment repository implementation.
#[derive(Clone)]
pub struct PgShipmentRepository {
    pool: PgPool,
}

impl PgShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, id: i32) -> Result<Vec<Shipment>, AppError> {
        let rows = sqlx::query_as::<_, ShipmentRow>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE {column} = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_shipment()).collect())
    }
}

#[async_trait]
impl ShipmentRepository for PgShipmentRepository {
    async fn count_open(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM shipments WHERE status IN ('pending', 'in_transit')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn find_active_with_names(&self, limit: i64) -> Result<Vec<ShipmentSummary>, AppError> {
        let rows = sqlx::query_as::<_, ShipmentSummaryRow>(&format!(
            r#"
            {SUMMARY_SELECT}
            WHERE s.status IN ('pending', 'in_transit')
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn list(&self, page: Page) -> Result<Vec<ShipmentSummary>, AppError> {
        let rows = sqlx::query_as::<_, ShipmentSummaryRow>(&format!(
            "{SUMMARY_SELECT} ORDER BY s.id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ShipmentSummary>, AppError> {
        let row = sqlx::query_as::<_, ShipmentSummaryRow>(&format!(
            "{SUMMARY_SELECT} WHERE s.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_summary()))
    }

    async fn find_by_client(&self, client_id: i32) -> Result<Vec<Shipment>, AppError> {
        self.find_where("client_id", client_id).await
    }

    async fn find_by_driver(&self, driver_id: i32) -> Result<Vec<Shipment>, AppError> {
        self.find_where("driver_id", driver_id).await
    }

    async fn find_by_vehicle(&self, vehicle_id: i32) -> Result<Vec<Shipment>, AppError> {
        self.find_where("vehicle_id", vehicle_id).await
    }

    async fn create(&self, shipment: &NewShipment) -> Result<Shipment, AppError> {
        let row = sqlx::query_as::<_, ShipmentRow>(&format!(
            r#"
            INSERT INTO shipments (client_id, driver_id, vehicle_id, origin, destination,
                                   weight, description, delivery_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SHIPMENT_COLUMNS}
            "#
        ))
        .bind(shipment.client_id)
        .bind(shipment.driver_id)
        .bind(shipment.vehicle_id)
        .bind(&shipment.origin)
        .bind(&shipment.destination)
        .bind(shipment.weight)
        .bind(&shipment.description)
        .bind(shipment.delivery_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_reference_violation(e, SHIPMENT_REFERENCES))?;

        Ok(row.into_shipment())
    }

    async fn assign(
        &self,
        id: i32,
        driver_id: i32,
        vehicle_id: i32,
    ) -> Result<AssignOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so the open-status check holds until commit.
        let previous: Option<(Option<i32>,)> = sqlx::query_as(
            r#"
            SELECT driver_id FROM shipments
            WHERE id = $1 AND status IN ('pending', 'in_transit')
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((previous_driver,)) = previous else {
            return Ok(AssignOutcome::NotOpen);
        };

        // Lock both drivers in id order so crossing reassignments cannot deadlock.
        let mut driver_ids = vec![driver_id];
        driver_ids.extend(previous_driver.filter(|d| *d != driver_id));
        driver_ids.sort_unstable();

        let locked: Vec<(i32, String)> = sqlx::query_as(
            r#"
            SELECT id, status::text FROM drivers
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(&driver_ids)
        .fetch_all(&mut *tx)
        .await?;

        let driver_free = match locked.iter().find(|(locked_id, _)| *locked_id == driver_id) {
            Some((_, status)) if status == DriverStatus::Available.as_str() => true,
            Some(_) => previous_driver == Some(driver_id),
            None => false,
        };
        if !driver_free {
            return Ok(AssignOutcome::DriverBusy);
        }

        let row = sqlx::query_as::<_, ShipmentRow>(&format!(
            r#"
            UPDATE shipments
            SET driver_id = $2, vehicle_id = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {SHIPMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(driver_id)
        .bind(vehicle_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_reference_violation(e, SHIPMENT_REFERENCES))?;

        if let Some(previous_driver) = previous_driver.filter(|d| *d != driver_id) {
            sqlx::query(RELEASE_DRIVER)
                .bind(previous_driver)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE drivers SET status = 'on_mission', updated_at = NOW() WHERE id = $1")
            .bind(driver_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AssignOutcome::Assigned(row.into_shipment()))
    }

    async fn transition(
        &self,
        id: i32,
        transition: &StatusTransition,
    ) -> Result<Option<Shipment>, AppError> {
        let mut tx = self.pool.begin().await?;

        let delivered = transition.to == ShipmentStatus::Delivered;
        let row = sqlx::query_as::<_, ShipmentRow>(&format!(
            r#"
            UPDATE shipments
            SET status = $3::shipment_status,
                delivered_at = CASE WHEN $4 THEN NOW() ELSE delivered_at END,
                proof_of_delivery = COALESCE($5, proof_of_delivery),
                updated_at = NOW()
            WHERE id = $1 AND status = $2::shipment_status
            RETURNING {SHIPMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(transition.from.as_str())
        .bind(transition.to.as_str())
        .bind(delivered)
        .bind(&transition.proof_of_delivery)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if transition.to.is_terminal() {
            if let Some(driver_id) = row.driver_id {
                sqlx::query(RELEASE_DRIVER)
                    .bind(driver_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(row.into_shipment()))
    }
}
