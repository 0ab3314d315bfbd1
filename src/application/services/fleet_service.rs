//! Fleet Service
//!
//! Vehicle registry, status changes and maintenance history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dto::response::VehicleDetail;
use crate::application::services::activity_log::record_activity;
use crate::domain::{
    ActivityRepository, ActivityType, MaintenanceRecord, NewActivity, NewMaintenanceRecord,
    NewVehicle, Page, ShipmentRepository, Vehicle, VehicleRepository, VehicleStatus,
};
use crate::shared::error::AppError;

#[async_trait]
pub trait FleetService: Send + Sync {
    async fn list_vehicles(&self, page: Page) -> Result<Vec<Vehicle>, FleetError>;

    /// Vehicle with its maintenance history and shipments.
    async fn get_vehicle(&self, id: i32) -> Result<VehicleDetail, FleetError>;

    async fn create_vehicle(&self, vehicle: NewVehicle) -> Result<Vehicle, FleetError>;

    async fn update_status(
        &self,
        id: i32,
        status: VehicleStatus,
        actor: Option<i32>,
    ) -> Result<Vehicle, FleetError>;

    async fn record_maintenance(
        &self,
        vehicle_id: i32,
        record: NewMaintenanceRecord,
        actor: Option<i32>,
    ) -> Result<MaintenanceRecord, FleetError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("Vehicle not found")]
    VehicleNotFound,

    #[error("License plate already registered")]
    DuplicatePlate,

    #[error(transparent)]
    Storage(#[from] AppError),
}

pub struct FleetServiceImpl<V, S, A>
where
    V: VehicleRepository,
    S: ShipmentRepository,
    A: ActivityRepository,
{
    vehicle_repo: Arc<V>,
    shipment_repo: Arc<S>,
    activity_repo: Arc<A>,
}

impl<V, S, A> FleetServiceImpl<V, S, A>
where
    V: VehicleRepository,
    S: ShipmentRepository,
    A: ActivityRepository,
{
    pub fn new(vehicle_repo: Arc<V>, shipment_repo: Arc<S>, activity_repo: Arc<A>) -> Self {
        Self {
            vehicle_repo,
            shipment_repo,
            activity_repo,
        }
    }
}

#[async_trait]
impl<V, S, A> FleetService for FleetServiceImpl<V, S, A>
where
    V: VehicleRepository + 'static,
    S: ShipmentRepository + 'static,
    A: ActivityRepository + 'static,
{
    async fn list_vehicles(&self, page: Page) -> Result<Vec<Vehicle>, FleetError> {
        Ok(self.vehicle_repo.list(page).await?)
    }

    async fn get_vehicle(&self, id: i32) -> Result<VehicleDetail, FleetError> {
        let vehicle = self
            .vehicle_repo
            .find_by_id(id)
            .await?
            .ok_or(FleetError::VehicleNotFound)?;

        let (maintenance_records, shipments) = futures::try_join!(
            self.vehicle_repo.maintenance_history(id),
            self.shipment_repo.find_by_vehicle(id),
        )?;

        Ok(VehicleDetail {
            vehicle,
            maintenance_records,
            shipments,
        })
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> Result<Vehicle, FleetError> {
        let created = self.vehicle_repo.create(&vehicle).await.map_err(|e| match e {
            AppError::Conflict(_) => FleetError::DuplicatePlate,
            e => FleetError::Storage(e),
        })?;

        tracing::info!(vehicle_id = created.id, plate = %created.license_plate, "Vehicle registered");

        Ok(created)
    }

    async fn update_status(
        &self,
        id: i32,
        status: VehicleStatus,
        actor: Option<i32>,
    ) -> Result<Vehicle, FleetError> {
        let vehicle = self
            .vehicle_repo
            .update_status(id, status)
            .await?
            .ok_or(FleetError::VehicleNotFound)?;

        tracing::info!(vehicle_id = id, status = %status, "Vehicle status changed");

        if status == VehicleStatus::Maintenance {
            record_activity(
                self.activity_repo.as_ref(),
                NewActivity::new(
                    ActivityType::MaintenanceAlert,
                    "Vehicle sent to maintenance",
                    vehicle.label(),
                    vehicle.id,
                )
                .by_user(actor),
            )
            .await;
        }

        Ok(vehicle)
    }

    async fn record_maintenance(
        &self,
        vehicle_id: i32,
        record: NewMaintenanceRecord,
        actor: Option<i32>,
    ) -> Result<MaintenanceRecord, FleetError> {
        let vehicle = self
            .vehicle_repo
            .find_by_id(vehicle_id)
            .await?
            .ok_or(FleetError::VehicleNotFound)?;

        let saved = self
            .vehicle_repo
            .record_maintenance(vehicle_id, &record)
            .await?;

        tracing::info!(vehicle_id, record_id = saved.id, "Maintenance recorded");

        record_activity(
            self.activity_repo.as_ref(),
            NewActivity::new(
                ActivityType::VehicleMaintenance,
                "Maintenance completed",
                format!("{}: {}", vehicle.label(), saved.description),
                vehicle.id,
            )
            .by_user(actor),
        )
        .await;

        Ok(saved)
    }
}
