//! Repository tests against PostgreSQL
//!
//! Each test gets a fresh database with the migrations applied by
//! `#[sqlx::test]`; `DATABASE_URL` must point at a server that allows
//! creating databases.

mod billing_repository_tests;
mod driver_repository_tests;
mod fixtures;
mod seed_tests;
mod shipment_repository_tests;
mod vehicle_repository_tests;
