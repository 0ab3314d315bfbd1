//! Shipment repository: active listing, status guard and dispatch locking.

use pretty_assertions::assert_eq;
use sqlx::PgPool;

use shipping_erp::domain::{AssignOutcome, ShipmentRepository, ShipmentStatus, StatusTransition};
use shipping_erp::infrastructure::repositories::PgShipmentRepository;
use shipping_erp::shared::error::AppError;

use super::fixtures;

#[sqlx::test]
async fn test_active_shipments_skip_closed_and_list_newest_first(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "on_mission", None).await;

    let oldest = fixtures::shipment(&pool, client, Some(driver), "in_transit", 30).await;
    fixtures::shipment(&pool, client, None, "delivered", 20).await;
    let newest = fixtures::shipment(&pool, client, None, "pending", 5).await;
    fixtures::shipment(&pool, client, None, "canceled", 1).await;

    let repo = PgShipmentRepository::new(pool.clone());
    let active = repo.find_active_with_names(10).await.unwrap();

    let ids: Vec<i32> = active.iter().map(|s| s.shipment.id).collect();
    assert_eq!(ids, vec![newest, oldest]);
    assert_eq!(active[0].driver_name, "");
    assert_eq!(active[1].driver_name, "Saeed");
    assert_eq!(active[1].client_name, "Gulf Foods");
    assert_eq!(repo.count_open().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_active_shipments_respect_limit(pool: PgPool) {
    let client = fixtures::client(&pool, "Najd Retail").await;
    for age in 1..=4 {
        fixtures::shipment(&pool, client, None, "pending", age).await;
    }

    let repo = PgShipmentRepository::new(pool.clone());
    assert_eq!(repo.find_active_with_names(3).await.unwrap().len(), 3);
}

#[sqlx::test]
async fn test_transition_requires_expected_current_status(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let id = fixtures::shipment(&pool, client, None, "pending", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    let stale = StatusTransition {
        from: ShipmentStatus::InTransit,
        to: ShipmentStatus::Delivered,
        proof_of_delivery: None,
    };
    assert!(repo.transition(id, &stale).await.unwrap().is_none());

    let current = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(current.shipment.status, ShipmentStatus::Pending);
    assert!(current.shipment.delivered_at.is_none());
}

#[sqlx::test]
async fn test_delivery_stamps_and_releases_driver(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "on_mission", None).await;
    let id = fixtures::shipment(&pool, client, Some(driver), "in_transit", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    let delivered = repo
        .transition(
            id,
            &StatusTransition {
                from: ShipmentStatus::InTransit,
                to: ShipmentStatus::Delivered,
                proof_of_delivery: Some("signed by receiver".into()),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(delivered.status, ShipmentStatus::Delivered);
    assert!(delivered.delivered_at.is_some());
    assert_eq!(delivered.proof_of_delivery.as_deref(), Some("signed by receiver"));
    assert_eq!(fixtures::driver_status(&pool, driver).await, "available");
}

#[sqlx::test]
async fn test_closing_one_shipment_keeps_driver_busy_with_another(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "on_mission", None).await;
    let first = fixtures::shipment(&pool, client, Some(driver), "pending", 2).await;
    fixtures::shipment(&pool, client, Some(driver), "in_transit", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    repo.transition(
        first,
        &StatusTransition {
            from: ShipmentStatus::Pending,
            to: ShipmentStatus::Canceled,
            proof_of_delivery: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(fixtures::driver_status(&pool, driver).await, "on_mission");
}

#[sqlx::test]
async fn test_assign_marks_driver_on_mission(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "available", None).await;
    let vehicle = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let id = fixtures::shipment(&pool, client, None, "pending", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    match repo.assign(id, driver, vehicle).await.unwrap() {
        AssignOutcome::Assigned(s) => {
            assert_eq!(s.driver_id, Some(driver));
            assert_eq!(s.vehicle_id, Some(vehicle));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
    assert_eq!(fixtures::driver_status(&pool, driver).await, "on_mission");
}

#[sqlx::test]
async fn test_assign_busy_driver_is_refused(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "on_mission", None).await;
    let vehicle = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    fixtures::shipment(&pool, client, Some(driver), "in_transit", 2).await;
    let id = fixtures::shipment(&pool, client, None, "pending", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    let outcome = repo.assign(id, driver, vehicle).await.unwrap();

    assert_eq!(outcome, AssignOutcome::DriverBusy);
    let unchanged = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(unchanged.shipment.driver_id, None);
}

#[sqlx::test]
async fn test_reassigning_same_driver_is_allowed(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "on_mission", None).await;
    let first_truck = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let second_truck = fixtures::vehicle(&pool, "RUH 1002", "active", None).await;
    let id = fixtures::shipment(&pool, client, Some(driver), "pending", 1).await;
    sqlx::query("UPDATE shipments SET vehicle_id = $2 WHERE id = $1")
        .bind(id)
        .bind(first_truck)
        .execute(&pool)
        .await
        .unwrap();
    let repo = PgShipmentRepository::new(pool.clone());

    let outcome = repo.assign(id, driver, second_truck).await.unwrap();

    assert!(matches!(outcome, AssignOutcome::Assigned(s) if s.vehicle_id == Some(second_truck)));
    assert_eq!(fixtures::driver_status(&pool, driver).await, "on_mission");
}

#[sqlx::test]
async fn test_reassignment_frees_previous_driver(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let previous = fixtures::driver(&pool, "Saeed", "on_mission", None).await;
    let next = fixtures::driver(&pool, "Fahad", "available", None).await;
    let vehicle = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let id = fixtures::shipment(&pool, client, Some(previous), "pending", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    let outcome = repo.assign(id, next, vehicle).await.unwrap();

    assert!(matches!(outcome, AssignOutcome::Assigned(_)));
    assert_eq!(fixtures::driver_status(&pool, previous).await, "available");
    assert_eq!(fixtures::driver_status(&pool, next).await, "on_mission");
}

#[sqlx::test]
async fn test_assign_closed_shipment_is_not_open(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "available", None).await;
    let vehicle = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let id = fixtures::shipment(&pool, client, None, "delivered", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    assert_eq!(
        repo.assign(id, driver, vehicle).await.unwrap(),
        AssignOutcome::NotOpen
    );
    assert_eq!(fixtures::driver_status(&pool, driver).await, "available");
}

#[sqlx::test]
async fn test_concurrent_assignments_of_one_driver_admit_one(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let driver = fixtures::driver(&pool, "Saeed", "available", None).await;
    let first_truck = fixtures::vehicle(&pool, "RUH 1001", "active", None).await;
    let second_truck = fixtures::vehicle(&pool, "RUH 1002", "active", None).await;
    let first = fixtures::shipment(&pool, client, None, "pending", 2).await;
    let second = fixtures::shipment(&pool, client, None, "pending", 1).await;
    let repo = PgShipmentRepository::new(pool.clone());

    let (a, b) = tokio::join!(
        repo.assign(first, driver, first_truck),
        repo.assign(second, driver, second_truck),
    );
    let outcomes = [a.unwrap(), b.unwrap()];

    let assigned = outcomes
        .iter()
        .filter(|o| matches!(o, AssignOutcome::Assigned(_)))
        .count();
    let refused = outcomes
        .iter()
        .filter(|o| **o == AssignOutcome::DriverBusy)
        .count();
    assert_eq!((assigned, refused), (1, 1));

    let holding: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM shipments WHERE driver_id = $1")
            .bind(driver)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(holding, 1);
}

#[sqlx::test]
async fn test_create_with_unknown_driver_is_not_found(pool: PgPool) {
    let client = fixtures::client(&pool, "Gulf Foods").await;
    let repo = PgShipmentRepository::new(pool.clone());

    let result = repo
        .create(&shipping_erp::domain::NewShipment {
            client_id: client,
            driver_id: Some(9_999),
            vehicle_id: None,
            origin: "Riyadh".into(),
            destination: "Tabuk".into(),
            weight: None,
            description: None,
            delivery_date: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(m)) if m == "Driver not found"));
}
