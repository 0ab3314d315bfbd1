//! Response DTOs
//!
//! Data structures for API response bodies. Computed fields are added next to
//! the flattened entity so the row keeps its own camelCase keys.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::services::{days_since_last_maintenance, relative_time};
use crate::domain::{
    Activity, Client, Driver, DriverAttendance, Employee, EmployeeAttendance, Invoice,
    MaintenanceRecord, Shipment, User, Vehicle,
};

/// Trips shown for the best driver on the dashboard.
pub const TOP_DRIVER_COMPLETED_TRIPS: i32 = 28;
/// Trips shown for every other top driver.
pub const OTHER_DRIVER_COMPLETED_TRIPS: i32 = 25;

/// User response; never includes the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Plain `{ "message": ... }` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `GET /api/dashboard/stats`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_shipments: i64,
    pub active_vehicles: i64,
    pub available_drivers: i64,
    pub monthly_revenue: i64,
}

/// `GET /api/vehicles/stats`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleStats {
    pub active: i64,
    pub maintenance: i64,
    pub inactive: i64,
}

/// `GET /api/drivers/stats`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverStats {
    pub available: i64,
    pub on_mission: i64,
    pub on_leave: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDueVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub days_since_last_maintenance: i64,
}

impl MaintenanceDueVehicle {
    pub fn new(vehicle: Vehicle, now: DateTime<Utc>) -> Self {
        let days = days_since_last_maintenance(vehicle.last_maintenance_date, now);
        Self {
            vehicle,
            days_since_last_maintenance: days,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopDriver {
    #[serde(flatten)]
    pub driver: Driver,
    pub completed_trips: i32,
}

impl TopDriver {
    /// `rank` is the zero-based position in the rating order.
    pub fn ranked(driver: Driver, rank: usize) -> Self {
        let completed_trips = if rank == 0 {
            TOP_DRIVER_COMPLETED_TRIPS
        } else {
            OTHER_DRIVER_COMPLETED_TRIPS
        };
        Self {
            driver,
            completed_trips,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    #[serde(flatten)]
    pub activity: Activity,
    pub relative_time: String,
}

impl ActivityResponse {
    pub fn new(activity: Activity, now: DateTime<Utc>) -> Self {
        let relative_time = relative_time(activity.created_at, now);
        Self {
            activity,
            relative_time,
        }
    }
}

/// `GET /api/vehicles/{id}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub shipments: Vec<Shipment>,
}

/// `GET /api/drivers/{id}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: Driver,
    pub shipments: Vec<Shipment>,
    pub attendance: Vec<DriverAttendance>,
}

/// `GET /api/clients/{id}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub shipments: Vec<Shipment>,
    pub invoices: Vec<Invoice>,
}

/// `GET /api/employees/{id}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub employee: Employee,
    pub user: Option<UserResponse>,
    pub attendance: Vec<EmployeeAttendance>,
}
