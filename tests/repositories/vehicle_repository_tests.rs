//! Vehicle repository: fleet counts and the maintenance queue.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

use shipping_erp::domain::{VehicleRepository, VehicleStatus};
use shipping_erp::infrastructure::repositories::PgVehicleRepository;

use super::fixtures;

#[sqlx::test]
async fn test_count_by_status(pool: PgPool) {
    fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    fixtures::vehicle(&pool, "RUH 1002", "active", None).await;
    fixtures::vehicle(&pool, "JED 2001", "maintenance", None).await;

    let repo = PgVehicleRepository::new(pool.clone());

    assert_eq!(repo.count_by_status(VehicleStatus::Active).await.unwrap(), 2);
    assert_eq!(repo.count_by_status(VehicleStatus::Maintenance).await.unwrap(), 1);
    assert_eq!(repo.count_by_status(VehicleStatus::Inactive).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_maintenance_candidates_are_active_and_oldest_first(pool: PgPool) {
    let now = Utc::now();
    let recent = fixtures::vehicle(&pool, "RUH 1001", "active", Some(now - Duration::days(10))).await;
    let overdue = fixtures::vehicle(&pool, "RUH 1002", "active", Some(now - Duration::days(200))).await;
    fixtures::vehicle(&pool, "JED 2001", "maintenance", Some(now - Duration::days(400))).await;
    fixtures::vehicle(&pool, "DMM 3001", "inactive", Some(now - Duration::days(500))).await;
    let middle = fixtures::vehicle(&pool, "RUH 1003", "active", Some(now - Duration::days(90))).await;

    let repo = PgVehicleRepository::new(pool.clone());
    let queue: Vec<i32> = repo
        .find_maintenance_candidates(10)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .collect();

    assert_eq!(queue, vec![overdue, middle, recent]);
    assert_eq!(repo.find_maintenance_candidates(1).await.unwrap()[0].id, overdue);
}
