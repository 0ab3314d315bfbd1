//! Authentication Middleware
//!
//! Session validation middleware for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::application::services::AuthService;
use crate::domain::User;
use crate::presentation::http::extractors::session_token;
use crate::presentation::http::handlers::auth::{auth_error, auth_service};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    /// Acting user for activity attribution.
    pub fn actor(&self) -> Option<i32> {
        Some(self.user.id)
    }
}

/// Authentication middleware that resolves the session token to a user.
///
/// Requests without a token are rejected before any database access.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers(), &state.settings.session.cookie_name)
        .ok_or_else(AppError::unauthorized)?;

    let user = auth_service(&state)
        .authenticate(&token)
        .await
        .map_err(auth_error)?;

    request.extensions_mut().insert(AuthUser { user });

    Ok(next.run(request).await)
}
