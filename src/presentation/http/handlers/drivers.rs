//! Driver Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateDriverRequest, UpdateDriverStatusRequest};
use crate::application::dto::response::DriverDetail;
use crate::application::services::{DriverError, DriverService, DriverServiceImpl};
use crate::domain::{Driver, PageParams};
use crate::infrastructure::repositories::{
    PgActivityRepository, PgDriverRepository, PgShipmentRepository,
};
use crate::presentation::http::extractors::{parse_id, AppJson, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn driver_service(
    state: &AppState,
) -> DriverServiceImpl<PgDriverRepository, PgShipmentRepository, PgActivityRepository> {
    DriverServiceImpl::new(
        Arc::new(PgDriverRepository::new(state.db.clone())),
        Arc::new(PgShipmentRepository::new(state.db.clone())),
        Arc::new(PgActivityRepository::new(state.db.clone())),
    )
}

fn driver_error(e: DriverError) -> AppError {
    match e {
        DriverError::DriverNotFound => AppError::NotFound("Driver not found".into()),
        DriverError::DuplicateLicense => {
            AppError::Conflict("License number already registered".into())
        }
        DriverError::Storage(e) => e,
    }
}

/// List drivers
pub async fn list_drivers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let drivers = driver_service(&state)
        .list_drivers(params.into())
        .await
        .map_err(driver_error)?;

    Ok(Json(drivers))
}

/// Get driver by ID with shipments and attendance
pub async fn get_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> Result<Json<DriverDetail>, AppError> {
    let driver_id = parse_id(&driver_id, "driver")?;

    let detail = driver_service(&state)
        .get_driver(driver_id)
        .await
        .map_err(driver_error)?;

    Ok(Json(detail))
}

/// Register a driver
pub async fn create_driver(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let driver = driver_service(&state)
        .create_driver(body.into())
        .await
        .map_err(driver_error)?;

    Ok((StatusCode::CREATED, Json(driver)))
}

/// Change a driver's status
pub async fn update_driver_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(driver_id): Path<String>,
    AppJson(body): AppJson<UpdateDriverStatusRequest>,
) -> Result<Json<Driver>, AppError> {
    let driver_id = parse_id(&driver_id, "driver")?;

    let driver = driver_service(&state)
        .update_status(driver_id, body.status, auth.actor())
        .await
        .map_err(driver_error)?;

    Ok(Json(driver))
}
