//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod billing;
pub mod clients;
pub mod dashboard;
pub mod drivers;
pub mod employees;
pub mod health;
pub mod shipments;
pub mod vehicles;
