//! Billing Service
//!
//! Invoices (money in) and expenses (money out).

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::activity_log::record_activity;
use crate::domain::{
    ActivityRepository, ActivityType, ClientRepository, EmployeeRepository, Expense,
    ExpenseRepository, Invoice, InvoiceRepository, InvoiceStatus, NewActivity, NewExpense,
    NewInvoice, Page, ShipmentRepository, VehicleRepository,
};
use crate::shared::error::AppError;

#[async_trait]
pub trait BillingService: Send + Sync {
    async fn list_invoices(&self, page: Page) -> Result<Vec<Invoice>, BillingError>;

    async fn get_invoice(&self, id: i32) -> Result<Invoice, BillingError>;

    async fn create_invoice(
        &self,
        invoice: NewInvoice,
        actor: Option<i32>,
    ) -> Result<Invoice, BillingError>;

    /// Settle an unpaid invoice. Paying twice is a conflict.
    async fn pay_invoice(&self, id: i32, actor: Option<i32>) -> Result<Invoice, BillingError>;

    async fn list_expenses(&self, page: Page) -> Result<Vec<Expense>, BillingError>;

    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, BillingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("Client not found")]
    ClientNotFound,

    #[error("Shipment not found")]
    ShipmentNotFound,

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Vehicle not found")]
    VehicleNotFound,

    #[error("Invoice is already paid")]
    AlreadyPaid,

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub struct BillingServiceImpl<I, E, C, S, P, V, A>
where
    I: InvoiceRepository,
    E: ExpenseRepository,
    C: ClientRepository,
    S: ShipmentRepository,
    P: EmployeeRepository,
    V: VehicleRepository,
    A: ActivityRepository,
{
    invoice_repo: Arc<I>,
    expense_repo: Arc<E>,
    client_repo: Arc<C>,
    shipment_repo: Arc<S>,
    employee_repo: Arc<P>,
    vehicle_repo: Arc<V>,
    activity_repo: Arc<A>,
}

impl<I, E, C, S, P, V, A> BillingServiceImpl<I, E, C, S, P, V, A>
where
    I: InvoiceRepository,
    E: ExpenseRepository,
    C: ClientRepository,
    S: ShipmentRepository,
    P: EmployeeRepository,
    V: VehicleRepository,
    A: ActivityRepository,
{
    pub fn new(
        invoice_repo: Arc<I>,
        expense_repo: Arc<E>,
        client_repo: Arc<C>,
        shipment_repo: Arc<S>,
        employee_repo: Arc<P>,
        vehicle_repo: Arc<V>,
        activity_repo: Arc<A>,
    ) -> Self {
        Self {
            invoice_repo,
            expense_repo,
            client_repo,
            shipment_repo,
            employee_repo,
            vehicle_repo,
            activity_repo,
        }
    }
}

#[async_trait]
impl<I, E, C, S, P, V, A> BillingService for BillingServiceImpl<I, E, C, S, P, V, A>
where
    I: InvoiceRepository + 'static,
    E: ExpenseRepository + 'static,
    C: ClientRepository + 'static,
    S: ShipmentRepository + 'static,
    P: EmployeeRepository + 'static,
    V: VehicleRepository + 'static,
    A: ActivityRepository + 'static,
{
    async fn list_invoices(&self, page: Page) -> Result<Vec<Invoice>, BillingError> {
        Ok(self.invoice_repo.list(page).await?)
    }

    async fn get_invoice(&self, id: i32) -> Result<Invoice, BillingError> {
        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or(BillingError::InvoiceNotFound)
    }

    async fn create_invoice(
        &self,
        invoice: NewInvoice,
        actor: Option<i32>,
    ) -> Result<Invoice, BillingError> {
        let client = self
            .client_repo
            .find_by_id(invoice.client_id)
            .await?
            .ok_or(BillingError::ClientNotFound)?;

        if let Some(shipment_id) = invoice.shipment_id {
            self.shipment_repo
                .find_by_id(shipment_id)
                .await?
                .ok_or(BillingError::ShipmentNotFound)?;
        }

        let created = self.invoice_repo.create(&invoice).await?;

        tracing::info!(invoice_id = created.id, client_id = client.id, "Invoice created");

        record_activity(
            self.activity_repo.as_ref(),
            NewActivity::new(
                ActivityType::InvoiceCreated,
                "Invoice issued",
                format!("#{} for {}: {}", created.id, client.name, created.amount),
                created.id,
            )
            .by_user(actor),
        )
        .await;

        Ok(created)
    }

    async fn pay_invoice(&self, id: i32, actor: Option<i32>) -> Result<Invoice, BillingError> {
        let paid = match self.invoice_repo.mark_paid(id).await? {
            Some(invoice) => invoice,
            None => {
                // Either missing or already settled; tell the caller which.
                return match self.invoice_repo.find_by_id(id).await? {
                    Some(invoice) if invoice.status == InvoiceStatus::Paid => {
                        Err(BillingError::AlreadyPaid)
                    }
                    _ => Err(BillingError::InvoiceNotFound),
                };
            }
        };

        tracing::info!(invoice_id = id, "Invoice paid");

        record_activity(
            self.activity_repo.as_ref(),
            NewActivity::new(
                ActivityType::InvoicePaid,
                "Invoice paid",
                format!("#{}: {}", paid.id, paid.amount),
                paid.id,
            )
            .by_user(actor),
        )
        .await;

        Ok(paid)
    }

    async fn list_expenses(&self, page: Page) -> Result<Vec<Expense>, BillingError> {
        Ok(self.expense_repo.list(page).await?)
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, BillingError> {
        if let Some(employee_id) = expense.approved_by {
            self.employee_repo
                .find_by_id(employee_id)
                .await?
                .ok_or(BillingError::EmployeeNotFound)?;
        }
        if let Some(vehicle_id) = expense.vehicle_id {
            self.vehicle_repo
                .find_by_id(vehicle_id)
                .await?
                .ok_or(BillingError::VehicleNotFound)?;
        }

        let created = self.expense_repo.create(&expense).await?;
        tracing::info!(expense_id = created.id, category = %created.category, "Expense recorded");
        Ok(created)
    }
}
