//! Employee Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{Employee, EmployeeAttendance, EmployeeRepository, EmployeeRole, Page};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    user_id: Option<i32>,
    name: String,
    position: String,
    role: String,
    phone: String,
    email: Option<String>,
    salary: Option<Decimal>,
    hire_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EmployeeRow {
    fn into_employee(self) -> Employee {
        Employee {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            position: self.position,
            role: EmployeeRole::parse(&self.role).unwrap_or_default(),
            phone: self.phone,
            email: self.email,
            salary: self.salary,
            hire_date: self.hire_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: i32,
    employee_id: i32,
    check_in: DateTime<Utc>,
    check_out: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

const EMPLOYEE_COLUMNS: &str = r#"id, user_id, name, position, role::text AS role, phone, email,
    salary, hire_date, created_at, updated_at"#;

/// PostgreSQL employee repository implementation.
#[derive(Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn list(&self, page: Page) -> Result<Vec<Employee>, AppError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_employee()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_employee()))
    }

    async fn attendance(&self, employee_id: i32) -> Result<Vec<EmployeeAttendance>, AppError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, employee_id, check_in, check_out, created_at
            FROM employee_attendance
            WHERE employee_id = $1
            ORDER BY check_in DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| EmployeeAttendance {
                id: r.id,
                employee_id: r.employee_id,
                check_in: r.check_in,
                check_out: r.check_out,
                created_at: r.created_at,
            })
            .collect())
    }
}
