//! Employee Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::application::dto::response::EmployeeDetail;
use crate::application::services::{EmployeeError, EmployeeService, EmployeeServiceImpl};
use crate::domain::{Employee, PageParams};
use crate::infrastructure::repositories::{PgEmployeeRepository, PgUserRepository};
use crate::presentation::http::extractors::parse_id;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn employee_service(state: &AppState) -> EmployeeServiceImpl<PgEmployeeRepository, PgUserRepository> {
    EmployeeServiceImpl::new(
        Arc::new(PgEmployeeRepository::new(state.db.clone())),
        Arc::new(PgUserRepository::new(state.db.clone())),
    )
}

fn employee_error(e: EmployeeError) -> AppError {
    match e {
        EmployeeError::EmployeeNotFound => AppError::NotFound("Employee not found".into()),
        EmployeeError::Storage(e) => e,
    }
}

/// List employees
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = employee_service(&state)
        .list_employees(params.into())
        .await
        .map_err(employee_error)?;

    Ok(Json(employees))
}

/// Get employee by ID with linked account and attendance
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<EmployeeDetail>, AppError> {
    let employee_id = parse_id(&employee_id, "employee")?;

    let detail = employee_service(&state)
        .get_employee(employee_id)
        .await
        .map_err(employee_error)?;

    Ok(Json(detail))
}
