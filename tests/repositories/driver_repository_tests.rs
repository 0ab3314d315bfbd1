//! Driver repository: leaderboard ordering and status counts.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sqlx::PgPool;

use shipping_erp::domain::{DriverRepository, DriverStatus};
use shipping_erp::infrastructure::repositories::PgDriverRepository;

use super::fixtures;

#[sqlx::test]
async fn test_top_rated_breaks_ties_by_id_and_puts_unrated_last(pool: PgPool) {
    let unrated = fixtures::driver(&pool, "Omar", "available", None).await;
    let first_tied = fixtures::driver(&pool, "Saeed", "available", Some(Decimal::new(48, 1))).await;
    let low = fixtures::driver(&pool, "Khalid", "on_leave", Some(Decimal::new(30, 1))).await;
    let second_tied = fixtures::driver(&pool, "Fahad", "on_mission", Some(Decimal::new(48, 1))).await;

    let repo = PgDriverRepository::new(pool.clone());
    let top: Vec<i32> = repo
        .top_rated(10)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();

    assert_eq!(top, vec![first_tied, second_tied, low, unrated]);
    assert_eq!(repo.top_rated(2).await.unwrap().len(), 2);
}

#[sqlx::test]
async fn test_count_by_status(pool: PgPool) {
    fixtures::driver(&pool, "Saeed", "available", None).await;
    fixtures::driver(&pool, "Fahad", "available", None).await;
    fixtures::driver(&pool, "Khalid", "on_mission", None).await;

    let repo = PgDriverRepository::new(pool.clone());

    assert_eq!(repo.count_by_status(DriverStatus::Available).await.unwrap(), 2);
    assert_eq!(repo.count_by_status(DriverStatus::OnMission).await.unwrap(), 1);
    assert_eq!(repo.count_by_status(DriverStatus::OnLeave).await.unwrap(), 0);
}
