//! Demo data seeding.

use pretty_assertions::assert_eq;
use sqlx::PgPool;

use shipping_erp::infrastructure::database::{seed_database, SeedOutcome};

#[sqlx::test]
async fn test_seed_activities_point_at_seeded_rows(pool: PgPool) {
    assert_eq!(seed_database(&pool).await.unwrap(), SeedOutcome::Seeded);

    let dangling: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM activities a
        WHERE (a.reference_type = 'shipment'
               AND NOT EXISTS (SELECT 1 FROM shipments s WHERE s.id = a.reference_id))
           OR (a.reference_type = 'vehicle'
               AND NOT EXISTS (SELECT 1 FROM vehicles v WHERE v.id = a.reference_id))
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(dangling, 0);

    let delivered_title: String = sqlx::query_scalar(
        r#"
        SELECT a.title FROM activities a
        JOIN shipments s ON s.id = a.reference_id
        WHERE a.type = 'shipment_delivered' AND s.status = 'delivered'
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(delivered_title.starts_with("Shipment #"));
}

#[sqlx::test]
async fn test_seed_skips_populated_database(pool: PgPool) {
    seed_database(&pool).await.unwrap();

    assert_eq!(
        seed_database(&pool).await.unwrap(),
        SeedOutcome::AlreadyPopulated
    );
}
