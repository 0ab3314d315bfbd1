//! Shipment Service
//!
//! Creation, dispatch (driver + vehicle assignment) and the status lifecycle.
//! Lifecycle rules live on [`ShipmentStatus`]; the repository re-checks the
//! current status inside its transaction so concurrent updates lose cleanly.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::activity_log::record_activity;
use crate::domain::{
    ActivityRepository, ActivityType, AssignOutcome, ClientRepository, DriverRepository, NewActivity,
    NewShipment, Page, Shipment, ShipmentRepository, ShipmentStatus, ShipmentSummary,
    StatusTransition, VehicleRepository, VehicleStatus,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

#[async_trait]
pub trait ShipmentService: Send + Sync {
    async fn list_shipments(&self, page: Page) -> Result<Vec<ShipmentSummary>, ShipmentError>;

    async fn get_shipment(&self, id: i32) -> Result<ShipmentSummary, ShipmentError>;

    async fn create_shipment(
        &self,
        shipment: NewShipment,
        actor: Option<i32>,
    ) -> Result<Shipment, ShipmentError>;

    async fn change_status(
        &self,
        id: i32,
        status: ShipmentStatus,
        proof_of_delivery: Option<String>,
        actor: Option<i32>,
    ) -> Result<Shipment, ShipmentError>;

    async fn assign(
        &self,
        id: i32,
        driver_id: i32,
        vehicle_id: i32,
        actor: Option<i32>,
    ) -> Result<Shipment, ShipmentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ShipmentError {
    #[error("Shipment not found")]
    ShipmentNotFound,

    #[error("Client not found")]
    ClientNotFound,

    #[error("Driver not found")]
    DriverNotFound,

    #[error("Vehicle not found")]
    VehicleNotFound,

    #[error("Driver is not available")]
    DriverUnavailable,

    #[error("Vehicle is not active")]
    VehicleUnavailable,

    #[error("Cannot change shipment status from {from} to {to}")]
    InvalidTransition {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    #[error("Cannot assign a {0} shipment")]
    NotAssignable(ShipmentStatus),

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub struct ShipmentServiceImpl<S, C, D, V, A>
where
    S: ShipmentRepository,
    C: ClientRepository,
    D: DriverRepository,
    V: VehicleRepository,
    A: ActivityRepository,
{
    shipment_repo: Arc<S>,
    client_repo: Arc<C>,
    driver_repo: Arc<D>,
    vehicle_repo: Arc<V>,
    activity_repo: Arc<A>,
}

impl<S, C, D, V, A> ShipmentServiceImpl<S, C, D, V, A>
where
    S: ShipmentRepository,
    C: ClientRepository,
    D: DriverRepository,
    V: VehicleRepository,
    A: ActivityRepository,
{
    pub fn new(
        shipment_repo: Arc<S>,
        client_repo: Arc<C>,
        driver_repo: Arc<D>,
        vehicle_repo: Arc<V>,
        activity_repo: Arc<A>,
    ) -> Self {
        Self {
            shipment_repo,
            client_repo,
            driver_repo,
            vehicle_repo,
            activity_repo,
        }
    }

    async fn current(&self, id: i32) -> Result<Shipment, ShipmentError> {
        self.shipment_repo
            .find_by_id(id)
            .await?
            .map(|s| s.shipment)
            .ok_or(ShipmentError::ShipmentNotFound)
    }
}

#[async_trait]
impl<S, C, D, V, A> ShipmentService for ShipmentServiceImpl<S, C, D, V, A>
where
    S: ShipmentRepository + 'static,
    C: ClientRepository + 'static,
    D: DriverRepository + 'static,
    V: VehicleRepository + 'static,
    A: ActivityRepository + 'static,
{
    async fn list_shipments(&self, page: Page) -> Result<Vec<ShipmentSummary>, ShipmentError> {
        Ok(self.shipment_repo.list(page).await?)
    }

    async fn get_shipment(&self, id: i32) -> Result<ShipmentSummary, ShipmentError> {
        self.shipment_repo
            .find_by_id(id)
            .await?
            .ok_or(ShipmentError::ShipmentNotFound)
    }

    async fn create_shipment(
        &self,
        shipment: NewShipment,
        actor: Option<i32>,
    ) -> Result<Shipment, ShipmentError> {
        let client = self
            .client_repo
            .find_by_id(shipment.client_id)
            .await?
            .ok_or(ShipmentError::ClientNotFound)?;

        if let Some(driver_id) = shipment.driver_id {
            self.driver_repo
                .find_by_id(driver_id)
                .await?
                .ok_or(ShipmentError::DriverNotFound)?;
        }
        if let Some(vehicle_id) = shipment.vehicle_id {
            self.vehicle_repo
                .find_by_id(vehicle_id)
                .await?
                .ok_or(ShipmentError::VehicleNotFound)?;
        }

        let created = self.shipment_repo.create(&shipment).await?;

        tracing::info!(shipment_id = created.id, client_id = client.id, "Shipment created");

        record_activity(
            self.activity_repo.as_ref(),
            NewActivity::new(
                ActivityType::ShipmentCreated,
                "New shipment",
                format!("{} for {}", created.route(), client.name),
                created.id,
            )
            .by_user(actor),
        )
        .await;

        Ok(created)
    }

    async fn change_status(
        &self,
        id: i32,
        status: ShipmentStatus,
        proof_of_delivery: Option<String>,
        actor: Option<i32>,
    ) -> Result<Shipment, ShipmentError> {
        let current = self.current(id).await?;

        if !current.status.can_transition_to(status) {
            return Err(ShipmentError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let transition = StatusTransition {
            from: current.status,
            to: status,
            proof_of_delivery: proof_of_delivery.filter(|_| status == ShipmentStatus::Delivered),
        };

        let updated = match self.shipment_repo.transition(id, &transition).await? {
            Some(updated) => updated,
            None => {
                // Lost a race: report against whatever the row holds now.
                let now = self.current(id).await?;
                return Err(ShipmentError::InvalidTransition {
                    from: now.status,
                    to: status,
                });
            }
        };

        tracing::info!(
            shipment_id = id,
            from = %transition.from,
            to = %transition.to,
            "Shipment status changed"
        );
        metrics::record_shipment_transition(transition.from.as_str(), transition.to.as_str());

        if status == ShipmentStatus::Delivered {
            record_activity(
                self.activity_repo.as_ref(),
                NewActivity::new(
                    ActivityType::ShipmentDelivered,
                    "Shipment delivered",
                    updated.route(),
                    updated.id,
                )
                .by_user(actor),
            )
            .await;
        }

        Ok(updated)
    }

    async fn assign(
        &self,
        id: i32,
        driver_id: i32,
        vehicle_id: i32,
        actor: Option<i32>,
    ) -> Result<Shipment, ShipmentError> {
        let current = self.current(id).await?;
        if !current.status.accepts_assignment() {
            return Err(ShipmentError::NotAssignable(current.status));
        }

        let driver = self
            .driver_repo
            .find_by_id(driver_id)
            .await?
            .ok_or(ShipmentError::DriverNotFound)?;
        // Reassigning the same driver to their own shipment is fine.
        if !driver.is_assignable() && current.driver_id != Some(driver_id) {
            return Err(ShipmentError::DriverUnavailable);
        }

        let vehicle = self
            .vehicle_repo
            .find_by_id(vehicle_id)
            .await?
            .ok_or(ShipmentError::VehicleNotFound)?;
        if vehicle.status != VehicleStatus::Active {
            return Err(ShipmentError::VehicleUnavailable);
        }

        let updated = match self.shipment_repo.assign(id, driver_id, vehicle_id).await? {
            AssignOutcome::Assigned(updated) => updated,
            AssignOutcome::NotOpen => {
                let now = self.current(id).await?;
                return Err(ShipmentError::NotAssignable(now.status));
            }
            // Another dispatch took the driver after our read.
            AssignOutcome::DriverBusy => return Err(ShipmentError::DriverUnavailable),
        };

        tracing::info!(shipment_id = id, driver_id, vehicle_id, "Shipment assigned");

        record_activity(
            self.activity_repo.as_ref(),
            NewActivity::new(
                ActivityType::ShipmentAssigned,
                "Shipment assigned",
                format!("{} to {} ({})", updated.route(), driver.name, vehicle.label()),
                updated.id,
            )
            .by_user(actor),
        )
        .await;

        Ok(updated)
    }
}
