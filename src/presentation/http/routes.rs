//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    auth, billing, clients, dashboard, drivers, employees, health, shipments, vehicles,
};
use crate::infrastructure::metrics;
use crate::presentation::middleware::{
    auth_middleware, create_security_headers_layer, create_security_headers_layer_no_hsts,
    track_metrics,
};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let security_headers = if state.settings.is_production() {
        create_security_headers_layer()
    } else {
        create_security_headers_layer_no_hsts()
    };

    Router::new()
        .nest("/api", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .layer(security_headers)
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    metrics::observe_pool(&state.db, state.settings.database.max_connections);
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::gather_metrics(),
    )
}

/// `/api` routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(protected_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Everything else requires a session
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(auth::current_user))
        // Dashboard widgets
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/shipments/active", get(dashboard::active_shipments))
        .route("/vehicles/stats", get(dashboard::vehicle_stats))
        .route("/vehicles/maintenance-due", get(dashboard::maintenance_due))
        .route("/drivers/stats", get(dashboard::driver_stats))
        .route("/drivers/top", get(dashboard::top_drivers))
        .route("/activities", get(dashboard::activities))
        // Fleet
        .route(
            "/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/vehicles/{id}", get(vehicles::get_vehicle))
        .route("/vehicles/{id}/status", patch(vehicles::update_vehicle_status))
        .route("/vehicles/{id}/maintenance", post(vehicles::record_maintenance))
        // Drivers
        .route(
            "/drivers",
            get(drivers::list_drivers).post(drivers::create_driver),
        )
        .route("/drivers/{id}", get(drivers::get_driver))
        .route("/drivers/{id}/status", patch(drivers::update_driver_status))
        // Shipments
        .route(
            "/shipments",
            get(shipments::list_shipments).post(shipments::create_shipment),
        )
        .route("/shipments/{id}", get(shipments::get_shipment))
        .route("/shipments/{id}/status", patch(shipments::update_shipment_status))
        .route("/shipments/{id}/assign", patch(shipments::assign_shipment))
        // Clients and staff
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route("/clients/{id}", get(clients::get_client))
        .route("/employees", get(employees::list_employees))
        .route("/employees/{id}", get(employees::get_employee))
        // Billing
        .route(
            "/invoices",
            get(billing::list_invoices).post(billing::create_invoice),
        )
        .route("/invoices/{id}", get(billing::get_invoice))
        .route("/invoices/{id}/pay", post(billing::pay_invoice))
        .route(
            "/expenses",
            get(billing::list_expenses).post(billing::create_expense),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
