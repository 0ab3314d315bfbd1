//! Dashboard Handlers
//!
//! Read-only endpoints behind the dashboard widgets. Every figure is computed
//! on request; nothing is cached.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::application::dto::request::ActivityQuery;
use crate::application::dto::response::{
    ActivityResponse, DashboardStats, DriverStats, MaintenanceDueVehicle, TopDriver, VehicleStats,
};
use crate::application::services::{DashboardService, DashboardServiceImpl};
use crate::domain::ShipmentSummary;
use crate::infrastructure::repositories::{
    PgActivityRepository, PgDriverRepository, PgShipmentRepository, PgVehicleRepository,
};
use crate::shared::error::AppError;
use crate::startup::AppState;

type Dashboard = DashboardServiceImpl<
    PgShipmentRepository,
    PgVehicleRepository,
    PgDriverRepository,
    PgActivityRepository,
>;

fn dashboard_service(state: &AppState) -> Dashboard {
    DashboardServiceImpl::new(
        Arc::new(PgShipmentRepository::new(state.db.clone())),
        Arc::new(PgVehicleRepository::new(state.db.clone())),
        Arc::new(PgDriverRepository::new(state.db.clone())),
        Arc::new(PgActivityRepository::new(state.db.clone())),
        state.settings.dashboard.monthly_revenue,
    )
}

/// Headline counts
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(dashboard_service(&state).stats().await?))
}

/// Newest open shipments with client and driver names
pub async fn active_shipments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShipmentSummary>>, AppError> {
    Ok(Json(dashboard_service(&state).active_shipments().await?))
}

/// Vehicle counts per status
pub async fn vehicle_stats(State(state): State<AppState>) -> Result<Json<VehicleStats>, AppError> {
    Ok(Json(dashboard_service(&state).vehicle_stats().await?))
}

/// Active vehicles longest without service
pub async fn maintenance_due(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceDueVehicle>>, AppError> {
    Ok(Json(dashboard_service(&state).maintenance_due().await?))
}

/// Driver counts per status
pub async fn driver_stats(State(state): State<AppState>) -> Result<Json<DriverStats>, AppError> {
    Ok(Json(dashboard_service(&state).driver_stats().await?))
}

/// Best rated drivers
pub async fn top_drivers(State(state): State<AppState>) -> Result<Json<Vec<TopDriver>>, AppError> {
    Ok(Json(dashboard_service(&state).top_drivers().await?))
}

/// Recent activity feed
pub async fn activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    Ok(Json(
        dashboard_service(&state)
            .recent_activities(query.limit())
            .await?,
    ))
}
