//! Vehicle and maintenance record entities.
//!
//! Maps to the `vehicles` and `maintenance_records` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// Vehicle status, the `vehicle_status` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [Self::Active, Self::Maintenance, Self::Inactive];

    /// Parse the database representation. Unknown values are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "maintenance" => Some(Self::Maintenance),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fleet vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    /// Unique across the fleet
    pub license_plate: String,
    pub status: VehicleStatus,
    pub manufacture_year: Option<i32>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Short label used in activity descriptions.
    pub fn label(&self) -> String {
        format!("{} - {}", self.model, self.license_plate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub model: String,
    pub vehicle_type: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub manufacture_year: Option<i32>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

/// A completed service event on a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub description: String,
    pub cost: Decimal,
    pub date: DateTime<Utc>,
    pub performed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRecord {
    pub description: String,
    pub cost: Decimal,
    pub date: DateTime<Utc>,
    pub performed_by: Option<String>,
    /// Replaces the vehicle's planned next service when present
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

/// Repository trait for vehicles and their maintenance history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// `SELECT COUNT(*) FROM vehicles WHERE status = $1`
    async fn count_by_status(&self, status: VehicleStatus) -> Result<i64, AppError>;

    /// Active vehicles ordered by last maintenance date, oldest first.
    async fn find_maintenance_candidates(&self, limit: i64) -> Result<Vec<Vehicle>, AppError>;

    async fn list(&self, page: Page) -> Result<Vec<Vehicle>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError>;

    /// Insert a vehicle; a duplicate plate is a conflict.
    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError>;

    /// Set the status, returning `None` when the vehicle does not exist.
    async fn update_status(&self, id: i32, status: VehicleStatus) -> Result<Option<Vehicle>, AppError>;

    /// Insert a maintenance record and roll the vehicle's maintenance dates
    /// forward in one transaction.
    async fn record_maintenance(
        &self,
        vehicle_id: i32,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, AppError>;

    /// Maintenance history, newest first.
    async fn maintenance_history(&self, vehicle_id: i32) -> Result<Vec<MaintenanceRecord>, AppError>;
}
