//! Dashboard Service
//!
//! Read-only aggregates behind the dashboard cards: headline counts, fleet and
//! driver breakdowns, open shipments and the activity feed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::response::{
    ActivityResponse, DashboardStats, DriverStats, MaintenanceDueVehicle, TopDriver, VehicleStats,
};
use crate::domain::{
    ActivityRepository, DriverRepository, DriverStatus, ShipmentRepository, ShipmentSummary,
    VehicleRepository, VehicleStatus,
};
use crate::shared::error::AppError;

/// Open shipments listed on the dashboard.
pub const ACTIVE_SHIPMENTS_LIMIT: i64 = 5;
/// Vehicles listed under "maintenance due".
pub const MAINTENANCE_DUE_LIMIT: i64 = 2;
/// Drivers listed under "top drivers".
pub const TOP_DRIVERS_LIMIT: i64 = 2;

/// Dashboard service trait. Every read is independent and uncached.
#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, AppError>;

    async fn active_shipments(&self) -> Result<Vec<ShipmentSummary>, AppError>;

    async fn vehicle_stats(&self) -> Result<VehicleStats, AppError>;

    async fn maintenance_due(&self) -> Result<Vec<MaintenanceDueVehicle>, AppError>;

    async fn driver_stats(&self) -> Result<DriverStats, AppError>;

    async fn top_drivers(&self) -> Result<Vec<TopDriver>, AppError>;

    async fn recent_activities(&self, limit: i64) -> Result<Vec<ActivityResponse>, AppError>;
}

pub struct DashboardServiceImpl<S, V, D, A>
where
    S: ShipmentRepository,
    V: VehicleRepository,
    D: DriverRepository,
    A: ActivityRepository,
{
    shipment_repo: Arc<S>,
    vehicle_repo: Arc<V>,
    driver_repo: Arc<D>,
    activity_repo: Arc<A>,
    monthly_revenue: i64,
}

impl<S, V, D, A> DashboardServiceImpl<S, V, D, A>
where
    S: ShipmentRepository,
    V: VehicleRepository,
    D: DriverRepository,
    A: ActivityRepository,
{
    pub fn new(
        shipment_repo: Arc<S>,
        vehicle_repo: Arc<V>,
        driver_repo: Arc<D>,
        activity_repo: Arc<A>,
        monthly_revenue: i64,
    ) -> Self {
        Self {
            shipment_repo,
            vehicle_repo,
            driver_repo,
            activity_repo,
            monthly_revenue,
        }
    }
}

#[async_trait]
impl<S, V, D, A> DashboardService for DashboardServiceImpl<S, V, D, A>
where
    S: ShipmentRepository + 'static,
    V: VehicleRepository + 'static,
    D: DriverRepository + 'static,
    A: ActivityRepository + 'static,
{
    async fn stats(&self) -> Result<DashboardStats, AppError> {
        let (total_shipments, active_vehicles, available_drivers) = futures::try_join!(
            self.shipment_repo.count_open(),
            self.vehicle_repo.count_by_status(VehicleStatus::Active),
            self.driver_repo.count_by_status(DriverStatus::Available),
        )?;

        Ok(DashboardStats {
            total_shipments,
            active_vehicles,
            available_drivers,
            monthly_revenue: self.monthly_revenue,
        })
    }

    async fn active_shipments(&self) -> Result<Vec<ShipmentSummary>, AppError> {
        self.shipment_repo
            .find_active_with_names(ACTIVE_SHIPMENTS_LIMIT)
            .await
    }

    async fn vehicle_stats(&self) -> Result<VehicleStats, AppError> {
        let (active, maintenance, inactive) = futures::try_join!(
            self.vehicle_repo.count_by_status(VehicleStatus::Active),
            self.vehicle_repo.count_by_status(VehicleStatus::Maintenance),
            self.vehicle_repo.count_by_status(VehicleStatus::Inactive),
        )?;

        Ok(VehicleStats {
            active,
            maintenance,
            inactive,
        })
    }

    async fn maintenance_due(&self) -> Result<Vec<MaintenanceDueVehicle>, AppError> {
        let vehicles = self
            .vehicle_repo
            .find_maintenance_candidates(MAINTENANCE_DUE_LIMIT)
            .await?;

        let now = Utc::now();
        Ok(vehicles
            .into_iter()
            .map(|v| MaintenanceDueVehicle::new(v, now))
            .collect())
    }

    async fn driver_stats(&self) -> Result<DriverStats, AppError> {
        let (available, on_mission, on_leave) = futures::try_join!(
            self.driver_repo.count_by_status(DriverStatus::Available),
            self.driver_repo.count_by_status(DriverStatus::OnMission),
            self.driver_repo.count_by_status(DriverStatus::OnLeave),
        )?;

        Ok(DriverStats {
            available,
            on_mission,
            on_leave,
        })
    }

    async fn top_drivers(&self) -> Result<Vec<TopDriver>, AppError> {
        let drivers = self.driver_repo.top_rated(TOP_DRIVERS_LIMIT).await?;

        Ok(drivers
            .into_iter()
            .enumerate()
            .map(|(rank, driver)| TopDriver::ranked(driver, rank))
            .collect())
    }

    async fn recent_activities(&self, limit: i64) -> Result<Vec<ActivityResponse>, AppError> {
        let activities = self.activity_repo.recent(limit).await?;

        let now = Utc::now();
        Ok(activities
            .into_iter()
            .map(|a| ActivityResponse::new(a, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Activity, ActivityType, Driver, MockActivityRepository, MockDriverRepository,
        MockShipmentRepository, MockVehicleRepository, Vehicle,
    };
    use chrono::Duration;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    type Service = DashboardServiceImpl<
        MockShipmentRepository,
        MockVehicleRepository,
        MockDriverRepository,
        MockActivityRepository,
    >;

    fn service(
        shipments: MockShipmentRepository,
        vehicles: MockVehicleRepository,
        drivers: MockDriverRepository,
        activities: MockActivityRepository,
    ) -> Service {
        DashboardServiceImpl::new(
            Arc::new(shipments),
            Arc::new(vehicles),
            Arc::new(drivers),
            Arc::new(activities),
            125_400,
        )
    }

    fn vehicle(id: i32, days_ago: Option<i64>) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id,
            model: "Hino 500".into(),
            vehicle_type: "Medium truck".into(),
            license_plate: format!("KSA {id}"),
            status: VehicleStatus::Active,
            manufacture_year: None,
            last_maintenance_date: days_ago.map(|d| now - Duration::days(d)),
            next_maintenance_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn driver(id: i32, rating: i64) -> Driver {
        let now = Utc::now();
        Driver {
            id,
            name: format!("Driver {id}"),
            phone: "0551112233".into(),
            license_number: format!("L{id:04}"),
            license_expiry: now,
            status: DriverStatus::Available,
            rating: Some(Decimal::new(rating, 1)),
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_stats_combines_counts_and_revenue() {
        let mut shipments = MockShipmentRepository::new();
        shipments.expect_count_open().returning(|| Ok(12));

        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_count_by_status()
            .with(eq(VehicleStatus::Active))
            .returning(|_| Ok(7));

        let mut drivers = MockDriverRepository::new();
        drivers
            .expect_count_by_status()
            .with(eq(DriverStatus::Available))
            .returning(|_| Ok(4));

        let stats = service(shipments, vehicles, drivers, MockActivityRepository::new())
            .stats()
            .await
            .unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                total_shipments: 12,
                active_vehicles: 7,
                available_drivers: 4,
                monthly_revenue: 125_400,
            }
        );
    }

    #[tokio::test]
    async fn test_stats_fails_whole_when_one_count_fails() {
        let mut shipments = MockShipmentRepository::new();
        shipments.expect_count_open().returning(|| Ok(12));

        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_count_by_status()
            .returning(|_| Err(AppError::Internal("db down".into())));

        let mut drivers = MockDriverRepository::new();
        drivers.expect_count_by_status().returning(|_| Ok(4));

        let result = service(shipments, vehicles, drivers, MockActivityRepository::new())
            .stats()
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_vehicle_stats_by_status() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles.expect_count_by_status().returning(|status| {
            Ok(match status {
                VehicleStatus::Active => 9,
                VehicleStatus::Maintenance => 2,
                VehicleStatus::Inactive => 1,
            })
        });

        let stats = service(
            MockShipmentRepository::new(),
            vehicles,
            MockDriverRepository::new(),
            MockActivityRepository::new(),
        )
        .vehicle_stats()
        .await
        .unwrap();

        assert_eq!(
            stats,
            VehicleStats {
                active: 9,
                maintenance: 2,
                inactive: 1
            }
        );
    }

    #[tokio::test]
    async fn test_driver_stats_by_status() {
        let mut drivers = MockDriverRepository::new();
        drivers.expect_count_by_status().returning(|status| {
            Ok(match status {
                DriverStatus::Available => 5,
                DriverStatus::OnMission => 3,
                DriverStatus::OnLeave => 0,
            })
        });

        let stats = service(
            MockShipmentRepository::new(),
            MockVehicleRepository::new(),
            drivers,
            MockActivityRepository::new(),
        )
        .driver_stats()
        .await
        .unwrap();

        assert_eq!(stats.available, 5);
        assert_eq!(stats.on_mission, 3);
        assert_eq!(stats.on_leave, 0);
    }

    #[tokio::test]
    async fn test_maintenance_due_limits_and_computes_days() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_maintenance_candidates()
            .with(eq(2))
            .returning(|_| Ok(vec![vehicle(1, Some(60)), vehicle(2, None)]));

        let due = service(
            MockShipmentRepository::new(),
            vehicles,
            MockDriverRepository::new(),
            MockActivityRepository::new(),
        )
        .maintenance_due()
        .await
        .unwrap();

        let days: Vec<i64> = due.iter().map(|d| d.days_since_last_maintenance).collect();
        assert_eq!(days, vec![60, 45]);
    }

    #[tokio::test]
    async fn test_top_drivers_keep_repository_order() {
        let mut drivers = MockDriverRepository::new();
        drivers
            .expect_top_rated()
            .with(eq(2))
            .returning(|_| Ok(vec![driver(3, 49), driver(1, 47)]));

        let top = service(
            MockShipmentRepository::new(),
            MockVehicleRepository::new(),
            drivers,
            MockActivityRepository::new(),
        )
        .top_drivers()
        .await
        .unwrap();

        assert_eq!(top[0].driver.id, 3);
        assert_eq!(top[0].completed_trips, 28);
        assert_eq!(top[1].driver.id, 1);
        assert_eq!(top[1].completed_trips, 25);
    }

    #[tokio::test]
    async fn test_active_shipments_requests_five() {
        let mut shipments = MockShipmentRepository::new();
        shipments
            .expect_find_active_with_names()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = service(
            shipments,
            MockVehicleRepository::new(),
            MockDriverRepository::new(),
            MockActivityRepository::new(),
        )
        .active_shipments()
        .await
        .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_recent_activities_adds_relative_time() {
        let mut activities = MockActivityRepository::new();
        activities.expect_recent().with(eq(3)).returning(|_| {
            Ok(vec![Activity {
                id: 1,
                activity_type: ActivityType::MaintenanceAlert,
                title: "Vehicle in maintenance".into(),
                description: "Hino 500 - KSA 1".into(),
                user_id: None,
                reference_id: Some(1),
                reference_type: Some("vehicle".into()),
                created_at: Utc::now() - Duration::minutes(5),
            }])
        });

        let feed = service(
            MockShipmentRepository::new(),
            MockVehicleRepository::new(),
            MockDriverRepository::new(),
            activities,
        )
        .recent_activities(3)
        .await
        .unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].relative_time, "5 minutes ago");
    }
}
