//! Billing repository: dangling references surface as not-found.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shipping_erp::domain::{ExpenseRepository, InvoiceRepository, NewExpense, NewInvoice};
use shipping_erp::infrastructure::repositories::{PgExpenseRepository, PgInvoiceRepository};
use shipping_erp::shared::error::AppError;

use super::fixtures;

fn expense(approved_by: Option<i32>, vehicle_id: Option<i32>) -> NewExpense {
    NewExpense {
        category: "fuel".into(),
        amount: Decimal::new(35000, 2),
        description: Some("Diesel, Riyadh depot".into()),
        date: Utc::now(),
        approved_by,
        vehicle_id,
    }
}

#[sqlx::test]
async fn test_invoice_for_missing_shipment_is_not_found(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let repo = PgInvoiceRepository::new(pool.clone());

    let result = repo
        .create(&NewInvoice {
            client_id: client,
            shipment_id: Some(9_999),
            amount: Decimal::new(120000, 2),
            due_date: Utc::now() + Duration::days(30),
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(m)) if m == "Shipment not found"));
}

#[sqlx::test]
async fn test_invoice_for_existing_shipment_is_unpaid(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let shipment = fixtures::shipment(&pool, client, None, "delivered", 1).await;
    let repo = PgInvoiceRepository::new(pool.clone());

    let invoice = repo
        .create(&NewInvoice {
            client_id: client,
            shipment_id: Some(shipment),
            amount: Decimal::new(120000, 2),
            due_date: Utc::now() + Duration::days(30),
        })
        .await
        .unwrap();

    assert_eq!(invoice.shipment_id, Some(shipment));
    assert!(invoice.paid_at.is_none());
}

#[sqlx::test]
async fn test_expense_with_missing_vehicle_is_not_found(pool: PgPool) {
    let repo = PgExpenseRepository::new(pool.clone());

    let result = repo.create(&expense(None, Some(9_999))).await;

    assert!(matches!(result, Err(AppError::NotFound(m)) if m == "Vehicle not found"));
}

#[sqlx::test]
async fn test_expense_with_missing_approver_is_not_found(pool: PgPool) {
    let vehicle = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let repo = PgExpenseRepository::new(pool.clone());

    let result = repo.create(&expense(Some(9_999), Some(vehicle))).await;

    assert!(matches!(result, Err(AppError::NotFound(m)) if m == "Employee not found"));
}

#[sqlx::test]
async fn test_expense_with_known_references(pool: PgPool) {
    let vehicle = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let approver = fixtures::employee(&pool, "Huda").await;
    let repo = PgExpenseRepository::new(pool.clone());

    let created = repo.create(&expense(Some(approver), Some(vehicle))).await.unwrap();

    assert_eq!(created.approved_by, Some(approver));
    assert_eq!(created.vehicle_id, Some(vehicle));
}
