//! Client Service

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::response::ClientDetail;
use crate::domain::{Client, ClientRepository, InvoiceRepository, NewClient, Page, ShipmentRepository};
use crate::shared::error::AppError;

#[async_trait]
pub trait ClientService: Send + Sync {
    async fn list_clients(&self, page: Page) -> Result<Vec<Client>, ClientError>;

    /// Client with its shipments and invoices.
    async fn get_client(&self, id: i32) -> Result<ClientDetail, ClientError>;

    async fn create_client(&self, client: NewClient) -> Result<Client, ClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Client not found")]
    ClientNotFound,

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub struct ClientServiceImpl<C, S, I>
where
    C: ClientRepository,
    S: ShipmentRepository,
    I: InvoiceRepository,
{
    client_repo: Arc<C>,
    shipment_repo: Arc<S>,
    invoice_repo: Arc<I>,
}

impl<C, S, I> ClientServiceImpl<C, S, I>
where
    C: ClientRepository,
    S: ShipmentRepository,
    I: InvoiceRepository,
{
    pub fn new(client_repo: Arc<C>, shipment_repo: Arc<S>, invoice_repo: Arc<I>) -> Self {
        Self {
            client_repo,
            shipment_repo,
            invoice_repo,
        }
    }
}

#[async_trait]
impl<C, S, I> ClientService for ClientServiceImpl<C, S, I>
where
    C: ClientRepository + 'static,
    S: ShipmentRepository + 'static,
    I: InvoiceRepository + 'static,
{
    async fn list_clients(&self, page: Page) -> Result<Vec<Client>, ClientError> {
        Ok(self.client_repo.list(page).await?)
    }

    async fn get_client(&self, id: i32) -> Result<ClientDetail, ClientError> {
        let client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or(ClientError::ClientNotFound)?;

        let (shipments, invoices) = futures::try_join!(
            self.shipment_repo.find_by_client(id),
            self.invoice_repo.find_by_client(id),
        )?;

        Ok(ClientDetail {
            client,
            shipments,
            invoices,
        })
    }

    async fn create_client(&self, client: NewClient) -> Result<Client, ClientError> {
        let created = self.client_repo.create(&client).await?;
        tracing::info!(client_id = created.id, "Client created");
        Ok(created)
    }
}
