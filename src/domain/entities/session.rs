//! User Session entity and repository trait.
//!
//! Maps to the `user_sessions` table in the database schema.
//! A session is created on login/registration; the browser holds the raw
//! token in a cookie and only its SHA-256 hash is persisted.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents an authenticated browser or API session.
///
/// Maps to the `user_sessions` table:
/// - id: UUID PRIMARY KEY
/// - user_id: INTEGER NOT NULL REFERENCES users(id)
/// - token_hash: VARCHAR(64) NOT NULL UNIQUE (SHA-256 hex)
/// - user_agent: TEXT NULL
/// - expires_at: TIMESTAMPTZ NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - last_used_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,

    pub user_id: i32,

    /// SHA-256 hash of the session token (never store raw tokens)
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// Raw user agent string at login
    pub user_agent: Option<String>,

    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    pub last_used_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session that expires `ttl` from now.
    pub fn new(user_id: i32, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            user_agent: None,
            expires_at: now + ttl,
            created_at: now,
            last_used_at: now,
        }
    }

    /// Attach the client's user agent.
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Check if the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check if the session is currently usable.
    pub fn is_active(&self) -> bool {
        !self.is_expired_at(Utc::now())
    }
}

/// Repository trait for Session data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find an unexpired session by token hash.
    async fn find_active_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Persist a new session.
    async fn create(&self, session: &Session) -> Result<Session, AppError>;

    /// Update last_used_at timestamp.
    async fn touch(&self, id: Uuid) -> Result<(), AppError>;

    /// Delete the session owning this token hash (logout).
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Delete all expired sessions.
    async fn cleanup_expired(&self) -> Result<u64, AppError>;
}
