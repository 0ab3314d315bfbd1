//! Demo data seeding
//!
//! Populates an empty database with an admin account and a small fleet so the
//! dashboard has something to show. Does nothing once any user exists.

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::application::services::hash_password;
use crate::shared::error::AppError;

/// Username of the seeded administrator.
pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

/// Result of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded,
    AlreadyPopulated,
}

/// Seed demo data inside a single transaction.
pub async fn seed_database(pool: &PgPool) -> Result<SeedOutcome, AppError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!(users = existing, "Database already has data, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let password_hash =
        hash_password(ADMIN_PASSWORD).map_err(|e| AppError::Internal(e.to_string()))?;

    let mut tx = pool.begin().await?;

    let admin_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO users (username, password, full_name, email, role)
        VALUES ($1, $2, $3, $4, 'admin')
        RETURNING id
        "#,
    )
    .bind(ADMIN_USERNAME)
    .bind(&password_hash)
    .bind("Ahmed Mohammed")
    .bind("admin@shipping-erp.com")
    .fetch_one(&mut *tx)
    .await?;

    let client_ids = seed_clients(&mut tx).await?;
    let vehicle_ids = seed_vehicles(&mut tx).await?;
    let driver_ids = seed_drivers(&mut tx).await?;
    let shipment_ids = seed_shipments(&mut tx, &client_ids, &driver_ids, &vehicle_ids).await?;
    seed_maintenance(&mut tx, &vehicle_ids).await?;
    seed_employees(&mut tx, admin_id).await?;
    seed_activities(&mut tx, admin_id, &shipment_ids, vehicle_ids[0]).await?;

    tx.commit().await?;

    tracing::info!(
        clients = client_ids.len(),
        vehicles = vehicle_ids.len(),
        drivers = driver_ids.len(),
        shipments = shipment_ids.len(),
        "Database seeding completed"
    );

    Ok(SeedOutcome::Seeded)
}

async fn seed_clients(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<i32>, AppError> {
    let clients = [
        (
            "United Supplies Co.",
            "Mohammed Al-Ahmad",
            "+966512345678",
            "info@united-supplies.com",
            "Riyadh, Olaya District, Takhassusi Street",
        ),
        (
            "East Food Factory",
            "Khalid Al-Otaibi",
            "+966523456789",
            "info@east-food.com",
            "Dammam, Industrial Area",
        ),
        (
            "Al-Saad Trading Group",
            "Saad Al-Harthi",
            "+966534567890",
            "info@alsaad-trading.com",
            "Jeddah, Al-Rawdah District",
        ),
    ];

    let mut ids = Vec::with_capacity(clients.len());
    for (name, contact, phone, email, address) in clients {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO clients (name, contact_person, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(contact)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }

    Ok(ids)
}

async fn seed_vehicles(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<i32>, AppError> {
    let now = Utc::now();
    let vehicles = [
        ("Mercedes Actros", "Heavy truck", "HTK 4172", "active", 2020, 45),
        ("Volvo FH", "Heavy truck", "GTA 7281", "active", 2021, 38),
        ("Isuzu NPR", "Medium truck", "LKT 5531", "maintenance", 2019, 0),
        ("MAN TGX", "Heavy truck", "RTS 9921", "active", 2020, 15),
        ("Toyota Hiace", "Van", "PWQ 3391", "active", 2022, 5),
    ];

    let mut ids = Vec::with_capacity(vehicles.len());
    for (model, kind, plate, status, year, days_ago) in vehicles {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO vehicles (model, type, license_plate, status, manufacture_year, last_maintenance_date)
            VALUES ($1, $2, $3, $4::vehicle_status, $5, $6)
            RETURNING id
            "#,
        )
        .bind(model)
        .bind(kind)
        .bind(plate)
        .bind(status)
        .bind(year)
        .bind(now - Duration::days(days_ago))
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }

    Ok(ids)
}

async fn seed_drivers(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<i32>, AppError> {
    let drivers = [
        ("Khalid Al-Anazi", "+966512345678", "SA10029382", (2024, 12, 30), "available", Decimal::new(50, 1)),
        ("Mohammed Abdullah", "+966523456789", "SA20038471", (2025, 6, 15), "on_mission", Decimal::new(48, 1)),
        ("Ahmed Al-Shammari", "+966534567890", "SA30047562", (2025, 3, 28), "available", Decimal::new(45, 1)),
    ];

    let mut ids = Vec::with_capacity(drivers.len());
    for (name, phone, license, (year, month, day), status, rating) in drivers {
        let expiry = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::Internal("Invalid seed license expiry".into()))?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO drivers (name, phone, license_number, license_expiry, status, rating)
            VALUES ($1, $2, $3, $4, $5::driver_status, $6)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(license)
        .bind(expiry)
        .bind(status)
        .bind(rating)
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }

    Ok(ids)
}

async fn seed_shipments(
    tx: &mut Transaction<'_, Postgres>,
    clients: &[i32],
    drivers: &[i32],
    vehicles: &[i32],
) -> Result<Vec<i32>, AppError> {
    let now = Utc::now();
    let shipments = [
        (clients[0], Some(drivers[1]), Some(vehicles[0]), "Riyadh", "Jeddah", "in_transit", 1500, "Building materials and electrical tools", 2, -3),
        (clients[1], Some(drivers[0]), Some(vehicles[1]), "Dammam", "Riyadh", "in_transit", 2000, "Refrigerated food", 3, -1),
        (clients[2], None, None, "Riyadh", "Medina", "pending", 1000, "Electronics", 5, 0),
        (clients[0], Some(drivers[1]), Some(vehicles[0]), "Riyadh", "Dammam", "delivered", 800, "Office furniture", -1, -4),
    ];

    let mut ids = Vec::with_capacity(shipments.len());
    for (client, driver, vehicle, origin, destination, status, weight, description, due_in, created) in
        shipments
    {
        let delivered_at = (status == "delivered").then(|| now - Duration::minutes(45));

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO shipments (client_id, driver_id, vehicle_id, origin, destination, status,
                                   weight, description, delivery_date, created_at, delivered_at)
            VALUES ($1, $2, $3, $4, $5, $6::shipment_status, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(client)
        .bind(driver)
        .bind(vehicle)
        .bind(origin)
        .bind(destination)
        .bind(status)
        .bind(Decimal::from(weight))
        .bind(description)
        .bind(now + Duration::days(due_in))
        .bind(now + Duration::days(created))
        .bind(delivered_at)
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }

    // The second shipment puts its driver on a mission.
    sqlx::query("UPDATE drivers SET status = 'on_mission' WHERE id = $1")
        .bind(drivers[0])
        .execute(&mut **tx)
        .await?;

    Ok(ids)
}

async fn seed_maintenance(
    tx: &mut Transaction<'_, Postgres>,
    vehicles: &[i32],
) -> Result<(), AppError> {
    let now = Utc::now();
    let records = [
        (vehicles[0], "Routine service and oil change", 1500, 45, "Al-Faris Workshop"),
        (vehicles[1], "Full inspection and filter change", 2000, 38, "Volvo Service Center"),
        (vehicles[2], "Cooling system repair", 3500, 0, "Main Maintenance Center"),
    ];

    for (vehicle, description, cost, days_ago, performed_by) in records {
        sqlx::query(
            r#"
            INSERT INTO maintenance_records (vehicle_id, description, cost, date, performed_by)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(vehicle)
        .bind(description)
        .bind(Decimal::from(cost))
        .bind(now - Duration::days(days_ago))
        .bind(performed_by)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn seed_employees(tx: &mut Transaction<'_, Postgres>, admin_id: i32) -> Result<(), AppError> {
    let employees = [
        (Some(admin_id), "Ahmed Mohammed", "System Administrator", "admin", "+966512345678", "admin@shipping-erp.com", 15000, (2021, 2, 15)),
        (None, "Sarah Al-Otaibi", "Accountant", "accountant", "+966523456789", "sarah@shipping-erp.com", 12000, (2021, 4, 10)),
        (None, "Fahad Al-Harbi", "HR Manager", "hr", "+966534567890", "fahad@shipping-erp.com", 13000, (2021, 3, 20)),
    ];

    for (user_id, name, position, role, phone, email, salary, (year, month, day)) in employees {
        let hire_date = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::Internal("Invalid seed hire date".into()))?;

        sqlx::query(
            r#"
            INSERT INTO employees (user_id, name, position, role, phone, email, salary, hire_date)
            VALUES ($1, $2, $3, $4::employee_role, $5, $6, $7, $8)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(position)
        .bind(role)
        .bind(phone)
        .bind(email)
        .bind(Decimal::from(salary))
        .bind(hire_date)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn seed_activities(
    tx: &mut Transaction<'_, Postgres>,
    admin_id: i32,
    shipments: &[i32],
    vehicle_id: i32,
) -> Result<(), AppError> {
    let now = Utc::now();
    let (pending, delivered) = (shipments[2], shipments[3]);
    let activities = [
        (
            "shipment_delivered",
            format!("Shipment #{} delivered", delivered),
            "Delivered by Mohammed Abdullah to United Supplies Co.",
            delivered,
            "shipment",
            Duration::minutes(45),
        ),
        (
            "shipment_created",
            format!("New shipment #{} created", pending),
            "New shipment from Riyadh to Medina",
            pending,
            "shipment",
            Duration::hours(2),
        ),
        (
            "maintenance_alert",
            "Maintenance alert for HTK 4172".to_string(),
            "Mercedes Actros - HTK 4172 is due for routine service",
            vehicle_id,
            "vehicle",
            Duration::hours(4),
        ),
    ];

    for (kind, title, description, reference_id, reference_type, age) in activities {
        sqlx::query(
            r#"
            INSERT INTO activities (type, title, description, user_id, reference_id, reference_type, created_at)
            VALUES ($1::activity_type, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(kind)
        .bind(title)
        .bind(description)
        .bind(admin_id)
        .bind(reference_id)
        .bind(reference_type)
        .bind(now - age)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
