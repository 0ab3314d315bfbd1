//! Activity Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Activity, ActivityRepository, ActivityType, NewActivity};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: i32,
    #[sqlx(rename = "type")]
    activity_type: String,
    title: String,
    description: String,
    user_id: Option<i32>,
    reference_id: Option<i32>,
    reference_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl ActivityRow {
    fn into_activity(self) -> Result<Activity, AppError> {
        let activity_type = ActivityType::parse(&self.activity_type).ok_or_else(|| {
            AppError::Internal(format!("Unknown activity type: {}", self.activity_type))
        })?;

        Ok(Activity {
            id: self.id,
            activity_type,
            title: self.title,
            description: self.description,
            user_id: self.user_id,
            reference_id: self.reference_id,
            reference_type: self.reference_type,
            created_at: self.created_at,
        })
    }
}

const ACTIVITY_COLUMNS: &str = r#"id, type::text AS type, title, description, user_id,
    reference_id, reference_type, created_at"#;

/// PostgreSQL activity feed repository implementation.
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn recent(&self, limit: i64) -> Result<Vec<Activity>, AppError> {
        let rows = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS}
            FROM activities
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_activity()).collect()
    }

    async fn create(&self, activity: &NewActivity) -> Result<Activity, AppError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            r#"
            INSERT INTO activities (type, title, description, user_id, reference_id, reference_type)
            VALUES ($1::activity_type, $2, $3, $4, $5, $6)
            RETURNING {ACTIVITY_COLUMNS}
            "#
        ))
        .bind(activity.activity_type.as_str())
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(activity.user_id)
        .bind(activity.reference_id)
        .bind(&activity.reference_type)
        .fetch_one(&self.pool)
        .await?;

        row.into_activity()
    }
}
