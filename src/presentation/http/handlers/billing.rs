//! Invoice and Expense Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::application::dto::request::{CreateExpenseRequest, CreateInvoiceRequest};
use crate::application::services::{BillingError, BillingService, BillingServiceImpl};
use crate::domain::{Expense, Invoice, PageParams};
use crate::infrastructure::repositories::{
    PgActivityRepository, PgClientRepository, PgEmployeeRepository, PgExpenseRepository,
    PgInvoiceRepository, PgShipmentRepository, PgVehicleRepository,
};
use crate::presentation::http::extractors::{parse_id, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

type Billing = BillingServiceImpl<
    PgInvoiceRepository,
    PgExpenseRepository,
    PgClientRepository,
    PgShipmentRepository,
    PgEmployeeRepository,
    PgVehicleRepository,
    PgActivityRepository,
>;

fn billing_service(state: &AppState) -> Billing {
    BillingServiceImpl::new(
        Arc::new(PgInvoiceRepository::new(state.db.clone())),
        Arc::new(PgExpenseRepository::new(state.db.clone())),
        Arc::new(PgClientRepository::new(state.db.clone())),
        Arc::new(PgShipmentRepository::new(state.db.clone())),
        Arc::new(PgEmployeeRepository::new(state.db.clone())),
        Arc::new(PgVehicleRepository::new(state.db.clone())),
        Arc::new(PgActivityRepository::new(state.db.clone())),
    )
}

fn billing_error(e: BillingError) -> AppError {
    match e {
        BillingError::InvoiceNotFound => AppError::NotFound("Invoice not found".into()),
        BillingError::ClientNotFound => AppError::NotFound("Client not found".into()),
        BillingError::ShipmentNotFound => AppError::NotFound("Shipment not found".into()),
        BillingError::EmployeeNotFound => AppError::NotFound("Employee not found".into()),
        BillingError::VehicleNotFound => AppError::NotFound("Vehicle not found".into()),
        BillingError::AlreadyPaid => AppError::Conflict("Invoice is already paid".into()),
        BillingError::Storage(e) => e,
    }
}

/// List invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let invoices = billing_service(&state)
        .list_invoices(params.into())
        .await
        .map_err(billing_error)?;

    Ok(Json(invoices))
}

/// Get invoice by ID
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<Json<Invoice>, AppError> {
    let invoice_id = parse_id(&invoice_id, "invoice")?;

    let invoice = billing_service(&state)
        .get_invoice(invoice_id)
        .await
        .map_err(billing_error)?;

    Ok(Json(invoice))
}

/// Issue an invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let invoice = billing_service(&state)
        .create_invoice(body.into(), auth.actor())
        .await
        .map_err(billing_error)?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Mark an invoice as paid
pub async fn pay_invoice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(invoice_id): Path<String>,
) -> Result<Json<Invoice>, AppError> {
    let invoice_id = parse_id(&invoice_id, "invoice")?;

    let invoice = billing_service(&state)
        .pay_invoice(invoice_id, auth.actor())
        .await
        .map_err(billing_error)?;

    Ok(Json(invoice))
}

/// List expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = billing_service(&state)
        .list_expenses(params.into())
        .await
        .map_err(billing_error)?;

    Ok(Json(expenses))
}

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let expense = billing_service(&state)
        .create_expense(body.into_expense(Utc::now()))
        .await
        .map_err(billing_error)?;

    Ok((StatusCode::CREATED, Json(expense)))
}
