//! Invoice and expense entities.
//!
//! Maps to the `invoices` and `expenses` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// Payment state of an invoice. Stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(Self::Unpaid),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i32,
    pub client_id: i32,
    pub shipment_id: Option<i32>,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Unpaid and past its due date.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status == InvoiceStatus::Unpaid && self.due_date < now
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub client_id: i32,
    pub shipment_id: Option<i32>,
    pub amount: Decimal,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    /// Approving employee
    pub approved_by: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub approved_by: Option<i32>,
    pub vehicle_id: Option<i32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn list(&self, page: Page) -> Result<Vec<Invoice>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Invoice>, AppError>;

    async fn find_by_client(&self, client_id: i32) -> Result<Vec<Invoice>, AppError>;

    async fn create(&self, invoice: &NewInvoice) -> Result<Invoice, AppError>;

    /// Flip an unpaid invoice to paid and stamp `paid_at`.
    /// Returns `None` if the invoice is missing or already paid.
    async fn mark_paid(&self, id: i32) -> Result<Option<Invoice>, AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn list(&self, page: Page) -> Result<Vec<Expense>, AppError>;

    async fn create(&self, expense: &NewExpense) -> Result<Expense, AppError>;
}
