//! Client Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Client, ClientRepository, NewClient, Page};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i32,
    name: String,
    contact_person: Option<String>,
    phone: String,
    email: Option<String>,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Client {
        Client {
            id: self.id,
            name: self.name,
            contact_person: self.contact_person,
            phone: self.phone,
            email: self.email,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const CLIENT_COLUMNS: &str =
    "id, name, contact_person, phone, email, address, created_at, updated_at";

/// PostgreSQL client repository implementation.
#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn list(&self, page: Page) -> Result<Vec<Client>, AppError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_client()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_client()))
    }

    async fn create(&self, client: &NewClient) -> Result<Client, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (name, contact_person, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(&client.name)
        .bind(&client.contact_person)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(&client.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_client())
    }
}
