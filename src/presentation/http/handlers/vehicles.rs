//! Vehicle Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::application::dto::request::{
    CreateVehicleRequest, RecordMaintenanceRequest, UpdateVehicleStatusRequest,
};
use crate::application::dto::response::VehicleDetail;
use crate::application::services::{FleetError, FleetService, FleetServiceImpl};
use crate::domain::{MaintenanceRecord, PageParams, Vehicle};
use crate::infrastructure::repositories::{
    PgActivityRepository, PgShipmentRepository, PgVehicleRepository,
};
use crate::presentation::http::extractors::{parse_id, AppJson, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn fleet_service(
    state: &AppState,
) -> FleetServiceImpl<PgVehicleRepository, PgShipmentRepository, PgActivityRepository> {
    FleetServiceImpl::new(
        Arc::new(PgVehicleRepository::new(state.db.clone())),
        Arc::new(PgShipmentRepository::new(state.db.clone())),
        Arc::new(PgActivityRepository::new(state.db.clone())),
    )
}

fn fleet_error(e: FleetError) -> AppError {
    match e {
        FleetError::VehicleNotFound => AppError::NotFound("Vehicle not found".into()),
        FleetError::DuplicatePlate => {
            AppError::Conflict("License plate already registered".into())
        }
        FleetError::Storage(e) => e,
    }
}

/// List vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = fleet_service(&state)
        .list_vehicles(params.into())
        .await
        .map_err(fleet_error)?;

    Ok(Json(vehicles))
}

/// Get vehicle by ID with maintenance history and shipments
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<VehicleDetail>, AppError> {
    let vehicle_id = parse_id(&vehicle_id, "vehicle")?;

    let detail = fleet_service(&state)
        .get_vehicle(vehicle_id)
        .await
        .map_err(fleet_error)?;

    Ok(Json(detail))
}

/// Register a vehicle
pub async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = fleet_service(&state)
        .create_vehicle(body.into())
        .await
        .map_err(fleet_error)?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Change a vehicle's status
pub async fn update_vehicle_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(vehicle_id): Path<String>,
    AppJson(body): AppJson<UpdateVehicleStatusRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle_id = parse_id(&vehicle_id, "vehicle")?;

    let vehicle = fleet_service(&state)
        .update_status(vehicle_id, body.status, auth.actor())
        .await
        .map_err(fleet_error)?;

    Ok(Json(vehicle))
}

/// Record a maintenance visit
pub async fn record_maintenance(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(vehicle_id): Path<String>,
    ValidatedJson(body): ValidatedJson<RecordMaintenanceRequest>,
) -> Result<(StatusCode, Json<MaintenanceRecord>), AppError> {
    let vehicle_id = parse_id(&vehicle_id, "vehicle")?;

    let record = fleet_service(&state)
        .record_maintenance(vehicle_id, body.into_record(Utc::now()), auth.actor())
        .await
        .map_err(fleet_error)?;

    Ok((StatusCode::CREATED, Json(record)))
}
