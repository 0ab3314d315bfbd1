//! Driver and driver attendance entities.
//!
//! Maps to the `drivers` and `driver_attendance` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// Driver availability, the `driver_status` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[default]
    Available,
    OnMission,
    OnLeave,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 3] = [Self::Available, Self::OnMission, Self::OnLeave];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "on_mission" => Some(Self::OnMission),
            "on_leave" => Some(Self::OnLeave),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnMission => "on_mission",
            Self::OnLeave => "on_leave",
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A licensed driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i32,
    pub name: String,
    pub phone: String,
    /// Unique across drivers
    pub license_number: String,
    pub license_expiry: DateTime<Utc>,
    pub status: DriverStatus,
    /// One decimal place, 0.0-5.0; defaults to 5.0
    pub rating: Option<Decimal>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Only available drivers can be put on a shipment.
    pub fn is_assignable(&self) -> bool {
        self.status == DriverStatus::Available
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: DateTime<Utc>,
    pub status: DriverStatus,
    pub rating: Option<Decimal>,
    pub avatar: Option<String>,
}

/// A shift check-in/check-out pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverAttendance {
    pub id: i32,
    pub driver_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for drivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn count_by_status(&self, status: DriverStatus) -> Result<i64, AppError>;

    /// Highest rated first; equal ratings keep insertion (id) order.
    async fn top_rated(&self, limit: i64) -> Result<Vec<Driver>, AppError>;

    async fn list(&self, page: Page) -> Result<Vec<Driver>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, AppError>;

    /// Insert a driver; a duplicate license number is a conflict.
    async fn create(&self, driver: &NewDriver) -> Result<Driver, AppError>;

    async fn update_status(&self, id: i32, status: DriverStatus) -> Result<Option<Driver>, AppError>;

    /// Attendance rows, most recent check-in first.
    async fn attendance(&self, driver_id: i32) -> Result<Vec<DriverAttendance>, AppError>;
}
