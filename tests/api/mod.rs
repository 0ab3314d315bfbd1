//! REST API endpoint tests

mod auth_flow_tests;
mod auth_tests;
mod health_tests;
mod protected_routes_tests;
