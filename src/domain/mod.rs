//! # Domain Layer
//!
//! The domain layer contains the core business logic of the shipping back office.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Vehicle, Driver, Shipment, Invoice, etc.)
//! - **value_objects**: Immutable value types (pagination)
//! - **services**: Pure domain rules (maintenance age, relative time)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Status enums are closed; lifecycle rules live on the enum

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
