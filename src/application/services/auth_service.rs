//! Authentication Service
//!
//! Handles registration, password login and server-side sessions. The client
//! holds a random opaque token; only its SHA-256 hash is stored.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

use crate::domain::{NewUser, Session, SessionRepository, User, UserRepository, DEFAULT_USER_ROLE};
use crate::shared::error::AppError;

/// Length of the opaque session token handed to clients.
pub const SESSION_TOKEN_LENGTH: usize = 64;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and log it in.
    async fn register(
        &self,
        registration: Registration,
        user_agent: Option<String>,
    ) -> Result<(User, SessionToken), AuthError>;

    /// Verify credentials and open a session.
    async fn login(
        &self,
        username: &str,
        password: &str,
        user_agent: Option<String>,
    ) -> Result<(User, SessionToken), AuthError>;

    /// Drop the session behind `token`. Unknown tokens are ignored.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Resolve a session token to its user and mark the session as used.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameExists,

    #[error("Unauthorized")]
    Unauthenticated,

    #[error(transparent)]
    Storage(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a new random alphanumeric session token.
pub fn generate_session_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Hex SHA-256 of a session token, the form stored in `user_sessions`.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// AuthService implementation
pub struct AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    session_ttl: Duration,
}

impl<U, S> AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, session_ttl: Duration) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl,
        }
    }

    async fn open_session(
        &self,
        user_id: i32,
        user_agent: Option<String>,
    ) -> Result<SessionToken, AuthError> {
        let token = generate_session_token();
        let session = Session::new(user_id, hash_session_token(&token), self.session_ttl)
            .with_user_agent(user_agent);

        let session = self.session_repo.create(&session).await?;

        Ok(SessionToken {
            token,
            expires_at: session.expires_at,
        })
    }
}

#[async_trait]
impl<U, S> AuthService for AuthServiceImpl<U, S>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    async fn register(
        &self,
        registration: Registration,
        user_agent: Option<String>,
    ) -> Result<(User, SessionToken), AuthError> {
        if self.user_repo.username_exists(&registration.username).await? {
            return Err(AuthError::UsernameExists);
        }

        let new_user = NewUser {
            username: registration.username,
            password_hash: hash_password(&registration.password)?,
            full_name: registration.full_name,
            email: registration.email,
            role: DEFAULT_USER_ROLE.to_string(),
        };

        // A concurrent registration can still win the race; the unique
        // constraint surfaces that as a conflict.
        let user = self.user_repo.create(&new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => AuthError::UsernameExists,
            e => AuthError::Storage(e),
        })?;

        let token = self.open_session(user.id, user_agent).await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok((user, token))
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
        user_agent: Option<String>,
    ) -> Result<(User, SessionToken), AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.open_session(user.id, user_agent).await?;

        match self.session_repo.cleanup_expired().await {
            Ok(0) => {}
            Ok(purged) => tracing::debug!(purged, "Purged expired sessions"),
            Err(e) => tracing::warn!(error = %e, "Failed to purge expired sessions"),
        }

        tracing::info!(user_id = user.id, "User logged in");

        Ok((user, token))
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let deleted = self
            .session_repo
            .delete_by_token_hash(&hash_session_token(token))
            .await?;

        if deleted {
            tracing::debug!("Session ended");
        }

        Ok(())
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let session = self
            .session_repo
            .find_active_by_token_hash(&hash_session_token(token))
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        self.session_repo.touch(session.id).await?;

        Ok(user)
    }
}
