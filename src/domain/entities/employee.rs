//! Employee entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// Staff role, the `employee_role` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Admin,
    Manager,
    Accountant,
    Hr,
    #[default]
    Staff,
}

impl EmployeeRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "accountant" => Some(Self::Accountant),
            "hr" => Some(Self::Hr),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Accountant => "accountant",
            Self::Hr => "hr",
            Self::Staff => "staff",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    /// Linked login account, if the employee has one
    pub user_id: Option<i32>,
    pub name: String,
    pub position: String,
    pub role: EmployeeRole,
    pub phone: String,
    pub email: Option<String>,
    pub salary: Option<Decimal>,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendance {
    pub id: i32,
    pub employee_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self, page: Page) -> Result<Vec<Employee>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, AppError>;

    /// Attendance rows, most recent check-in first.
    async fn attendance(&self, employee_id: i32) -> Result<Vec<EmployeeAttendance>, AppError>;
}
