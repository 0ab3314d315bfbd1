//! Shipment Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    AssignShipmentRequest, CreateShipmentRequest, UpdateShipmentStatusRequest,
};
use crate::application::services::{ShipmentError, ShipmentService, ShipmentServiceImpl};
use crate::domain::{PageParams, Shipment, ShipmentSummary};
use crate::infrastructure::repositories::{
    PgActivityRepository, PgClientRepository, PgDriverRepository, PgShipmentRepository,
    PgVehicleRepository,
};
use crate::presentation::http::extractors::{parse_id, AppJson, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

type Shipments = ShipmentServiceImpl<
    PgShipmentRepository,
    PgClientRepository,
    PgDriverRepository,
    PgVehicleRepository,
    PgActivityRepository,
>;

fn shipment_service(state: &AppState) -> Shipments {
    ShipmentServiceImpl::new(
        Arc::new(PgShipmentRepository::new(state.db.clone())),
        Arc::new(PgClientRepository::new(state.db.clone())),
        Arc::new(PgDriverRepository::new(state.db.clone())),
        Arc::new(PgVehicleRepository::new(state.db.clone())),
        Arc::new(PgActivityRepository::new(state.db.clone())),
    )
}

fn shipment_error(e: ShipmentError) -> AppError {
    match e {
        ShipmentError::ShipmentNotFound
        | ShipmentError::ClientNotFound
        | ShipmentError::DriverNotFound
        | ShipmentError::VehicleNotFound => AppError::NotFound(e.to_string()),
        ShipmentError::DriverUnavailable
        | ShipmentError::VehicleUnavailable
        | ShipmentError::InvalidTransition { .. }
        | ShipmentError::NotAssignable(_) => AppError::Conflict(e.to_string()),
        ShipmentError::Storage(e) => e,
    }
}

/// List shipments
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ShipmentSummary>>, AppError> {
    let shipments = shipment_service(&state)
        .list_shipments(params.into())
        .await
        .map_err(shipment_error)?;

    Ok(Json(shipments))
}

/// Get shipment by ID
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(shipment_id): Path<String>,
) -> Result<Json<ShipmentSummary>, AppError> {
    let shipment_id = parse_id(&shipment_id, "shipment")?;

    let shipment = shipment_service(&state)
        .get_shipment(shipment_id)
        .await
        .map_err(shipment_error)?;

    Ok(Json(shipment))
}

/// Create a shipment
pub async fn create_shipment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<Shipment>), AppError> {
    let shipment = shipment_service(&state)
        .create_shipment(body.into(), auth.actor())
        .await
        .map_err(shipment_error)?;

    Ok((StatusCode::CREATED, Json(shipment)))
}

/// Advance a shipment through its lifecycle
pub async fn update_shipment_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(shipment_id): Path<String>,
    AppJson(body): AppJson<UpdateShipmentStatusRequest>,
) -> Result<Json<Shipment>, AppError> {
    let shipment_id = parse_id(&shipment_id, "shipment")?;

    let shipment = shipment_service(&state)
        .change_status(shipment_id, body.status, body.proof_of_delivery, auth.actor())
        .await
        .map_err(shipment_error)?;

    Ok(Json(shipment))
}

/// Dispatch a driver and vehicle
pub async fn assign_shipment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(shipment_id): Path<String>,
    AppJson(body): AppJson<AssignShipmentRequest>,
) -> Result<Json<Shipment>, AppError> {
    let shipment_id = parse_id(&shipment_id, "shipment")?;

    let shipment = shipment_service(&state)
        .assign(shipment_id, body.driver_id, body.vehicle_id, auth.actor())
        .await
        .map_err(shipment_error)?;

    Ok(Json(shipment))
}
