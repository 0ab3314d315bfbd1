//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Role given to accounts created through registration.
pub const DEFAULT_USER_ROLE: &str = "user";

/// Represents a dashboard account.
///
/// Maps to the `users` table:
/// - id: SERIAL PRIMARY KEY
/// - username: TEXT NOT NULL UNIQUE
/// - password: TEXT NOT NULL (Argon2 PHC string)
/// - full_name: TEXT NULL
/// - email: TEXT NULL
/// - role: TEXT DEFAULT 'user'
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,

    /// Username (at least 2 characters, unique)
    pub username: String,

    /// Argon2 password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub full_name: Option<String>,

    pub email: Option<String>,

    pub role: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the header: full name when present, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }

    /// Whether this account has the `admin` role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: String::new(),
            password_hash: String::new(),
            full_name: None,
            email: None,
            role: Some(DEFAULT_USER_ROLE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to insert a user. The password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Check if a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Create a new user in the database.
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    /// Total number of accounts.
    async fn count(&self) -> Result<i64, AppError>;
}
