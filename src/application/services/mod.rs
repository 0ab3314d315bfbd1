//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, server-side sessions
//! - **DashboardService**: Headline counts and dashboard lists
//! - **FleetService**: Vehicles, status changes, maintenance
//! - **DriverService**: Driver registry and status
//! - **ShipmentService**: Shipment creation, dispatch and lifecycle
//! - **ClientService**: Customer directory
//! - **EmployeeService**: Staff directory
//! - **BillingService**: Invoices and expenses

pub mod activity_log;
pub mod auth_service;
pub mod billing_service;
pub mod client_service;
pub mod dashboard_service;
pub mod driver_service;
pub mod employee_service;
pub mod fleet_service;
pub mod shipment_service;

pub use auth_service::{
    generate_session_token, hash_password, hash_session_token, verify_password, AuthError,
    AuthService, AuthServiceImpl, Registration, SessionToken,
};

pub use billing_service::{BillingError, BillingService, BillingServiceImpl};

pub use client_service::{ClientError, ClientService, ClientServiceImpl};

pub use dashboard_service::{DashboardService, DashboardServiceImpl};

pub use driver_service::{DriverError, DriverService, DriverServiceImpl};

pub use employee_service::{EmployeeError, EmployeeService, EmployeeServiceImpl};

pub use fleet_service::{FleetError, FleetService, FleetServiceImpl};

pub use shipment_service::{ShipmentError, ShipmentService, ShipmentServiceImpl};
