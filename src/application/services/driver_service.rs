//! Driver Service

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::response::DriverDetail;
use crate::application::services::activity_log::record_activity;
use crate::domain::{
    ActivityRepository, ActivityType, Driver, DriverRepository, DriverStatus, NewActivity,
    NewDriver, Page, ShipmentRepository,
};
use crate::shared::error::AppError;

#[async_trait]
pub trait DriverService: Send + Sync {
    async fn list_drivers(&self, page: Page) -> Result<Vec<Driver>, DriverError>;

    /// Driver with shipments and attendance.
    async fn get_driver(&self, id: i32) -> Result<DriverDetail, DriverError>;

    async fn create_driver(&self, driver: NewDriver) -> Result<Driver, DriverError>;

    async fn update_status(
        &self,
        id: i32,
        status: DriverStatus,
        actor: Option<i32>,
    ) -> Result<Driver, DriverError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Driver not found")]
    DriverNotFound,

    #[error("License number already registered")]
    DuplicateLicense,

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub struct DriverServiceImpl<D, S, A>
where
    D: DriverRepository,
    S: ShipmentRepository,
    A: ActivityRepository,
{
    driver_repo: Arc<D>,
    shipment_repo: Arc<S>,
    activity_repo: Arc<A>,
}

impl<D, S, A> DriverServiceImpl<D, S, A>
where
    D: DriverRepository,
    S: ShipmentRepository,
    A: ActivityRepository,
{
    pub fn new(driver_repo: Arc<D>, shipment_repo: Arc<S>, activity_repo: Arc<A>) -> Self {
        Self {
            driver_repo,
            shipment_repo,
            activity_repo,
        }
    }
}

#[async_trait]
impl<D, S, A> DriverService for DriverServiceImpl<D, S, A>
where
    D: DriverRepository + 'static,
    S: ShipmentRepository + 'static,
    A: ActivityRepository + 'static,
{
    async fn list_drivers(&self, page: Page) -> Result<Vec<Driver>, DriverError> {
        Ok(self.driver_repo.list(page).await?)
    }

    async fn get_driver(&self, id: i32) -> Result<DriverDetail, DriverError> {
        let driver = self
            .driver_repo
            .find_by_id(id)
            .await?
            .ok_or(DriverError::DriverNotFound)?;

        let (shipments, attendance) = futures::try_join!(
            self.shipment_repo.find_by_driver(id),
            self.driver_repo.attendance(id),
        )?;

        Ok(DriverDetail {
            driver,
            shipments,
            attendance,
        })
    }

    async fn create_driver(&self, driver: NewDriver) -> Result<Driver, DriverError> {
        let created = self.driver_repo.create(&driver).await.map_err(|e| match e {
            AppError::Conflict(_) => DriverError::DuplicateLicense,
            e => DriverError::Storage(e),
        })?;

        tracing::info!(driver_id = created.id, "Driver registered");

        Ok(created)
    }

    async fn update_status(
        &self,
        id: i32,
        status: DriverStatus,
        actor: Option<i32>,
    ) -> Result<Driver, DriverError> {
        let driver = self
            .driver_repo
            .update_status(id, status)
            .await?
            .ok_or(DriverError::DriverNotFound)?;

        tracing::info!(driver_id = id, status = %status, "Driver status changed");

        record_activity(
            self.activity_repo.as_ref(),
            NewActivity::new(
                ActivityType::DriverStatusChange,
                "Driver status changed",
                format!("{} is now {}", driver.name, status),
                driver.id,
            )
            .by_user(actor),
        )
        .await;

        Ok(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DriverAttendance, MockActivityRepository, MockDriverRepository, MockShipmentRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    fn driver(id: i32, status: DriverStatus) -> Driver {
        let now = Utc::now();
        Driver {
            id,
            name: "Yousef".into(),
            phone: "0543219876".into(),
            license_number: "KSA-77120".into(),
            license_expiry: now,
            status,
            rating: None,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_update_status_records_activity() {
        let mut drivers = MockDriverRepository::new();
        drivers
            .expect_update_status()
            .with(eq(6), eq(DriverStatus::OnLeave))
            .returning(|id, status| Ok(Some(driver(id, status))));

        let mut activities = MockActivityRepository::new();
        activities
            .expect_create()
            .withf(|a: &NewActivity| {
                a.activity_type == ActivityType::DriverStatusChange
                    && a.description == "Yousef is now on_leave"
                    && a.reference_type.as_deref() == Some("driver")
            })
            .times(1)
            .returning(|_| Err(AppError::Internal("not inspected".into())));

        let updated = DriverServiceImpl::new(
            Arc::new(drivers),
            Arc::new(MockShipmentRepository::new()),
            Arc::new(activities),
        )
        .update_status(6, DriverStatus::OnLeave, None)
        .await
        .unwrap();

        assert_eq!(updated.status, DriverStatus::OnLeave);
    }

    #[tokio::test]
    async fn test_get_driver_collects_relations() {
        let mut drivers = MockDriverRepository::new();
        drivers
            .expect_find_by_id()
            .returning(|id| Ok(Some(driver(id, DriverStatus::Available))));
        drivers.expect_attendance().with(eq(2)).returning(|id| {
            Ok(vec![DriverAttendance {
                id: 1,
                driver_id: id,
                check_in: Utc::now(),
                check_out: None,
                created_at: Utc::now(),
            }])
        });

        let mut shipments = MockShipmentRepository::new();
        shipments
            .expect_find_by_driver()
            .with(eq(2))
            .returning(|_| Ok(vec![]));

        let detail = DriverServiceImpl::new(
            Arc::new(drivers),
            Arc::new(shipments),
            Arc::new(MockActivityRepository::new()),
        )
        .get_driver(2)
        .await
        .unwrap();

        assert_eq!(detail.driver.id, 2);
        assert_eq!(detail.attendance.len(), 1);
        assert!(detail.shipments.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_driver() {
        let mut drivers = MockDriverRepository::new();
        drivers.expect_find_by_id().returning(|_| Ok(None));

        let result = DriverServiceImpl::new(
            Arc::new(drivers),
            Arc::new(MockShipmentRepository::new()),
            Arc::new(MockActivityRepository::new()),
        )
        .get_driver(404)
        .await;

        assert!(matches!(result, Err(DriverError::DriverNotFound)));
    }
}
