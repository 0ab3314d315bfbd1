//! Employee Service
//!
//! Read side of the staff directory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::response::{EmployeeDetail, UserResponse};
use crate::domain::{Employee, EmployeeRepository, Page, UserRepository};
use crate::shared::error::AppError;

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list_employees(&self, page: Page) -> Result<Vec<Employee>, EmployeeError>;

    /// Employee with linked account and attendance.
    async fn get_employee(&self, id: i32) -> Result<EmployeeDetail, EmployeeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    #[error("Employee not found")]
    EmployeeNotFound,

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub struct EmployeeServiceImpl<E, U>
where
    E: EmployeeRepository,
    U: UserRepository,
{
    employee_repo: Arc<E>,
    user_repo: Arc<U>,
}

impl<E, U> EmployeeServiceImpl<E, U>
where
    E: EmployeeRepository,
    U: UserRepository,
{
    pub fn new(employee_repo: Arc<E>, user_repo: Arc<U>) -> Self {
        Self {
            employee_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl<E, U> EmployeeService for EmployeeServiceImpl<E, U>
where
    E: EmployeeRepository + 'static,
    U: UserRepository + 'static,
{
    async fn list_employees(&self, page: Page) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.employee_repo.list(page).await?)
    }

    async fn get_employee(&self, id: i32) -> Result<EmployeeDetail, EmployeeError> {
        let employee = self
            .employee_repo
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::EmployeeNotFound)?;

        let user = match employee.user_id {
            Some(user_id) => self.user_repo.find_by_id(user_id).await?,
            None => None,
        };
        let attendance = self.employee_repo.attendance(id).await?;

        Ok(EmployeeDetail {
            employee,
            user: user.map(UserResponse::from),
            attendance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeRole, MockEmployeeRepository, MockUserRepository, User};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn employee(id: i32, user_id: Option<i32>) -> Employee {
        let now = Utc::now();
        Employee {
            id,
            user_id,
            name: "Huda".into(),
            position: "Accountant".into(),
            role: EmployeeRole::Accountant,
            phone: "0501231234".into(),
            email: None,
            salary: None,
            hire_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_employee_with_linked_user() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|id| Ok(Some(employee(id, Some(4)))));
        employees.expect_attendance().returning(|_| Ok(vec![]));

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().with(eq(4)).returning(|id| {
            Ok(Some(User {
                id,
                username: "huda".into(),
                ..User::default()
            }))
        });

        let detail = EmployeeServiceImpl::new(Arc::new(employees), Arc::new(users))
            .get_employee(2)
            .await
            .unwrap();

        assert_eq!(detail.user.map(|u| u.username), Some("huda".to_string()));
    }

    #[tokio::test]
    async fn test_employee_without_user_skips_lookup() {
        let mut employees = MockEmployeeRepository::new();
        employees
            .expect_find_by_id()
            .returning(|id| Ok(Some(employee(id, None))));
        employees.expect_attendance().returning(|_| Ok(vec![]));

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();

        let detail = EmployeeServiceImpl::new(Arc::new(employees), Arc::new(users))
            .get_employee(2)
            .await
            .unwrap();

        assert!(detail.user.is_none());
    }
}
