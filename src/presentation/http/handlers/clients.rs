//! Client Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CreateClientRequest;
use crate::application::dto::response::ClientDetail;
use crate::application::services::{ClientError, ClientService, ClientServiceImpl};
use crate::domain::{Client, PageParams};
use crate::infrastructure::repositories::{
    PgClientRepository, PgInvoiceRepository, PgShipmentRepository,
};
use crate::presentation::http::extractors::{parse_id, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn client_service(
    state: &AppState,
) -> ClientServiceImpl<PgClientRepository, PgShipmentRepository, PgInvoiceRepository> {
    ClientServiceImpl::new(
        Arc::new(PgClientRepository::new(state.db.clone())),
        Arc::new(PgShipmentRepository::new(state.db.clone())),
        Arc::new(PgInvoiceRepository::new(state.db.clone())),
    )
}

fn client_error(e: ClientError) -> AppError {
    match e {
        ClientError::ClientNotFound => AppError::NotFound("Client not found".into()),
        ClientError::Storage(e) => e,
    }
}

/// List clients
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients = client_service(&state)
        .list_clients(params.into())
        .await
        .map_err(client_error)?;

    Ok(Json(clients))
}

/// Get client by ID with shipments and invoices
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientDetail>, AppError> {
    let client_id = parse_id(&client_id, "client")?;

    let detail = client_service(&state)
        .get_client(client_id)
        .await
        .map_err(client_error)?;

    Ok(Json(detail))
}

/// Register a client
pub async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let client = client_service(&state)
        .create_client(body.into())
        .await
        .map_err(client_error)?;

    Ok((StatusCode::CREATED, Json(client)))
}
