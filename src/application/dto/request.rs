//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::{
    DriverStatus, NewClient, NewDriver, NewExpense, NewInvoice, NewMaintenanceRecord, NewShipment,
    NewVehicle, ShipmentStatus, VehicleStatus,
};

/// Most entries `GET /api/activities` returns.
pub const MAX_ACTIVITY_LIMIT: i64 = 50;

/// Default size of the dashboard activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 3;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Username must be at least 2 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create vehicle request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, message = "Model must be at least 2 characters"))]
    pub model: String,

    #[serde(rename = "type")]
    #[validate(length(min = 2, message = "Type must be at least 2 characters"))]
    pub vehicle_type: String,

    #[validate(length(min = 2, message = "License plate must be at least 2 characters"))]
    pub license_plate: String,

    #[serde(default)]
    pub status: VehicleStatus,

    #[validate(range(min = 1950, max = 2100, message = "Manufacture year is out of range"))]
    pub manufacture_year: Option<i32>,

    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(req: CreateVehicleRequest) -> Self {
        Self {
            model: req.model,
            vehicle_type: req.vehicle_type,
            license_plate: req.license_plate,
            status: req.status,
            manufacture_year: req.manufacture_year,
            last_maintenance_date: req.last_maintenance_date,
            next_maintenance_date: req.next_maintenance_date,
        }
    }
}

/// Vehicle status change request
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: VehicleStatus,
}

/// Record maintenance request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordMaintenanceRequest {
    #[validate(length(min = 3, message = "Description must be at least 3 characters"))]
    pub description: String,

    #[validate(custom(function = "crate::shared::validation::non_negative"))]
    pub cost: Decimal,

    /// Defaults to now
    pub date: Option<DateTime<Utc>>,

    pub performed_by: Option<String>,

    pub next_maintenance_date: Option<DateTime<Utc>>,
}

impl RecordMaintenanceRequest {
    pub fn into_record(self, now: DateTime<Utc>) -> NewMaintenanceRecord {
        NewMaintenanceRecord {
            description: self.description,
            cost: self.cost,
            date: self.date.unwrap_or(now),
            performed_by: self.performed_by,
            next_maintenance_date: self.next_maintenance_date,
        }
    }
}

/// Create driver request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 6, message = "Phone must be at least 6 characters"))]
    pub phone: String,

    #[validate(length(min = 4, message = "License number must be at least 4 characters"))]
    pub license_number: String,

    pub license_expiry: DateTime<Utc>,

    #[serde(default)]
    pub status: DriverStatus,

    #[validate(custom(function = "crate::shared::validation::rating"))]
    pub rating: Option<Decimal>,

    pub avatar: Option<String>,
}

impl From<CreateDriverRequest> for NewDriver {
    fn from(req: CreateDriverRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            license_number: req.license_number,
            license_expiry: req.license_expiry,
            status: req.status,
            rating: req.rating,
            avatar: req.avatar,
        }
    }
}

/// Driver status change request
#[derive(Debug, Deserialize)]
pub struct UpdateDriverStatusRequest {
    pub status: DriverStatus,
}

/// Create client request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    pub contact_person: Option<String>,

    #[validate(length(min = 6, message = "Phone must be at least 6 characters"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 4, message = "Address must be at least 4 characters"))]
    pub address: String,
}

impl From<CreateClientRequest> for NewClient {
    fn from(req: CreateClientRequest) -> Self {
        Self {
            name: req.name,
            contact_person: req.contact_person,
            phone: req.phone,
            email: req.email,
            address: req.address,
        }
    }
}

/// Create shipment request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub client_id: i32,
    pub driver_id: Option<i32>,
    pub vehicle_id: Option<i32>,

    #[validate(length(min = 2, message = "Origin must be at least 2 characters"))]
    pub origin: String,

    #[validate(length(min = 2, message = "Destination must be at least 2 characters"))]
    pub destination: String,

    #[validate(custom(function = "crate::shared::validation::non_negative"))]
    pub weight: Option<Decimal>,

    pub description: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
}

impl From<CreateShipmentRequest> for NewShipment {
    fn from(req: CreateShipmentRequest) -> Self {
        Self {
            client_id: req.client_id,
            driver_id: req.driver_id,
            vehicle_id: req.vehicle_id,
            origin: req.origin,
            destination: req.destination,
            weight: req.weight,
            description: req.description,
            delivery_date: req.delivery_date,
        }
    }
}

/// Shipment status change request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentStatusRequest {
    pub status: ShipmentStatus,
    /// Only stored when moving to `delivered`
    pub proof_of_delivery: Option<String>,
}

/// Assign driver and vehicle request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignShipmentRequest {
    pub driver_id: i32,
    pub vehicle_id: i32,
}

/// Create invoice request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub client_id: i32,
    pub shipment_id: Option<i32>,

    #[validate(custom(function = "crate::shared::validation::non_negative"))]
    pub amount: Decimal,

    pub due_date: DateTime<Utc>,
}

impl From<CreateInvoiceRequest> for NewInvoice {
    fn from(req: CreateInvoiceRequest) -> Self {
        Self {
            client_id: req.client_id,
            shipment_id: req.shipment_id,
            amount: req.amount,
            due_date: req.due_date,
        }
    }
}

/// Create expense request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[validate(length(min = 2, message = "Category must be at least 2 characters"))]
    pub category: String,

    #[validate(custom(function = "crate::shared::validation::non_negative"))]
    pub amount: Decimal,

    pub description: Option<String>,

    /// Defaults to now
    pub date: Option<DateTime<Utc>>,

    pub approved_by: Option<i32>,
    pub vehicle_id: Option<i32>,
}

impl CreateExpenseRequest {
    pub fn into_expense(self, now: DateTime<Utc>) -> NewExpense {
        NewExpense {
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date.unwrap_or(now),
            approved_by: self.approved_by,
            vehicle_id: self.vehicle_id,
        }
    }
}

/// Activity feed query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

impl ActivityQuery {
    /// Requested size clamped to `1..=MAX_ACTIVITY_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT)
    }
}
