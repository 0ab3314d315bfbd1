//! # Domain Entities
//!
//! Core domain entities representing the business objects of the shipping
//! back office. All entities map directly to their corresponding database tables.
//!
//! ## Fleet & Operations
//!
//! - **Vehicle**: Fleet vehicle with maintenance dates and history
//! - **Driver**: Licensed driver with availability status and rating
//! - **Shipment**: A consignment moving from origin to destination
//! - **Client**: Customer that ships goods and is invoiced
//!
//! ## Back Office
//!
//! - **Employee**: Staff member with attendance records
//! - **Invoice / Expense**: Money in and money out
//! - **Activity**: Append-only feed of notable events
//!
//! ## Accounts
//!
//! - **User**: Dashboard account with authentication data
//! - **Session**: Server-side login session
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod activity;
mod client;
mod driver;
mod employee;
mod invoice;
mod session;
mod shipment;
mod user;
mod vehicle;

pub use user::{NewUser, User, UserRepository, DEFAULT_USER_ROLE};

pub use session::{Session, SessionRepository};

pub use vehicle::{
    MaintenanceRecord, NewMaintenanceRecord, NewVehicle, Vehicle, VehicleRepository, VehicleStatus,
};

pub use driver::{Driver, DriverAttendance, DriverRepository, DriverStatus, NewDriver};

pub use client::{Client, ClientRepository, NewClient};

pub use shipment::{
    AssignOutcome, NewShipment, Shipment, ShipmentRepository, ShipmentStatus, ShipmentSummary,
    StatusTransition,
};

pub use employee::{Employee, EmployeeAttendance, EmployeeRepository, EmployeeRole};

pub use invoice::{
    Expense, ExpenseRepository, Invoice, InvoiceRepository, InvoiceStatus, NewExpense, NewInvoice,
};

pub use activity::{Activity, ActivityRepository, ActivityType, NewActivity};

#[cfg(test)]
pub use activity::MockActivityRepository;
#[cfg(test)]
pub use client::MockClientRepository;
#[cfg(test)]
pub use driver::MockDriverRepository;
#[cfg(test)]
pub use employee::MockEmployeeRepository;
#[cfg(test)]
pub use invoice::{MockExpenseRepository, MockInvoiceRepository};
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use shipment::MockShipmentRepository;
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use vehicle::MockVehicleRepository;
