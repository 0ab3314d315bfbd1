//! Invoice and Expense Repository Implementations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{
    Expense, ExpenseRepository, Invoice, InvoiceRepository, InvoiceStatus, NewExpense, NewInvoice,
    Page,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i32,
    client_id: i32,
    shipment_id: Option<i32>,
    amount: Decimal,
    status: String,
    due_date: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self) -> Invoice {
        Invoice {
            id: self.id,
            client_id: self.client_id,
            shipment_id: self.shipment_id,
            amount: self.amount,
            status: InvoiceStatus::parse(&self.status).unwrap_or_default(),
            due_date: self.due_date,
            paid_at: self.paid_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: i32,
    category: String,
    amount: Decimal,
    description: Option<String>,
    date: DateTime<Utc>,
    approved_by: Option<i32>,
    vehicle_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExpenseRow {
    fn into_expense(self) -> Expense {
        Expense {
            id: self.id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
            approved_by: self.approved_by,
            vehicle_id: self.vehicle_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const INVOICE_COLUMNS: &str =
    "id, client_id, shipment_id, amount, status, due_date, paid_at, created_at, updated_at";

const EXPENSE_COLUMNS: &str =
    "id, category, amount, description, date, approved_by, vehicle_id, created_at, updated_at";

const INVOICE_REFERENCES: &[(&str, &str)] = &[
    ("invoices_client_id_fkey", "Client not found"),
    ("invoices_shipment_id_fkey", "Shipment not found"),
];

const EXPENSE_REFERENCES: &[(&str, &str)] = &[
    ("expenses_approved_by_fkey", "Employee not found"),
    ("expenses_vehicle_id_fkey", "Vehicle not found"),
];

/// PostgreSQL invoice repository implementation.
#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn list(&self, page: Page) -> Result<Vec<Invoice>, AppError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_invoice()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_invoice()))
    }

    async fn find_by_client(&self, client_id: i32) -> Result<Vec<Invoice>, AppError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE client_id = $1 ORDER BY due_date DESC, id DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_invoice()).collect())
    }

    async fn create(&self, invoice: &NewInvoice) -> Result<Invoice, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            INSERT INTO invoices (client_id, shipment_id, amount, status, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(invoice.client_id)
        .bind(invoice.shipment_id)
        .bind(invoice.amount)
        .bind(InvoiceStatus::Unpaid.as_str())
        .bind(invoice.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_reference_violation(e, INVOICE_REFERENCES))?;

        Ok(row.into_invoice())
    }

    async fn mark_paid(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            r#"
            UPDATE invoices
            SET status = $2, paid_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(InvoiceStatus::Paid.as_str())
        .bind(InvoiceStatus::Unpaid.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_invoice()))
    }
}

/// PostgreSQL expense repository implementation.
#[derive(Clone)]
pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn list(&self, page: Page) -> Result<Vec<Expense>, AppError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_expense()).collect())
    }

    async fn create(&self, expense: &NewExpense) -> Result<Expense, AppError> {
        let row = sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            INSERT INTO expenses (category, amount, description, date, approved_by, vehicle_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.date)
        .bind(expense.approved_by)
        .bind(expense.vehicle_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_reference_violation(e, EXPENSE_REFERENCES))?;

        Ok(row.into_expense())
    }
}
