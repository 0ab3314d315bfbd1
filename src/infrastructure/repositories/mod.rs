//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! Each repository wraps a cloned `PgPool` and maps private `*Row` structs
//! into domain entities. Enum columns are selected as text and bound with an
//! explicit cast (`$1::vehicle_status`).
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgShipmentRepository, PgVehicleRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let shipment_repo = PgShipmentRepository::new(pool.clone());
//!     let vehicle_repo = PgVehicleRepository::new(pool.clone());
//! }
//! ```

pub mod activity_repository;
pub mod billing_repository;
pub mod client_repository;
pub mod driver_repository;
pub mod employee_repository;
pub mod session_repository;
pub mod shipment_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use activity_repository::PgActivityRepository;
pub use billing_repository::{PgExpenseRepository, PgInvoiceRepository};
pub use client_repository::PgClientRepository;
pub use driver_repository::PgDriverRepository;
pub use employee_repository::PgEmployeeRepository;
pub use session_repository::PgSessionRepository;
pub use shipment_repository::PgShipmentRepository;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;
