//! Authentication Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::{
    extract::cookie::{Cookie, CookieJar, SameSite},
    headers::UserAgent,
    TypedHeader,
};

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{MessageResponse, UserResponse};
use crate::application::services::{
    AuthError, AuthService, AuthServiceImpl, Registration, SessionToken,
};
use crate::infrastructure::metrics;
use crate::infrastructure::repositories::{PgSessionRepository, PgUserRepository};
use crate::presentation::http::extractors::{session_token, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Build the session-backed auth service for a request.
pub fn auth_service(state: &AppState) -> AuthServiceImpl<PgUserRepository, PgSessionRepository> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let session_repo = Arc::new(PgSessionRepository::new(state.db.clone()));
    AuthServiceImpl::new(
        user_repo,
        session_repo,
        chrono::Duration::hours(state.settings.session.ttl_hours),
    )
}

/// Map auth failures onto HTTP errors.
pub fn auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::InvalidCredentials => AppError::Unauthorized("Invalid username or password".into()),
        AuthError::UsernameExists => AppError::Conflict("Username already exists".into()),
        AuthError::Unauthenticated => AppError::unauthorized(),
        AuthError::Storage(e) => e,
        AuthError::Internal(msg) => AppError::Internal(msg),
    }
}

fn session_cookie(state: &AppState, session: SessionToken) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.session.cookie_name.clone(), session.token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.settings.session.secure_cookie);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Register a new user and open a session
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, (StatusCode, Json<UserResponse>)), AppError> {
    let registration = Registration {
        username: body.username,
        password: body.password,
        full_name: body.full_name,
        email: body.email,
    };

    let (user, session) = auth_service(&state)
        .register(registration, user_agent.map(|TypedHeader(ua)| ua.to_string()))
        .await
        .map_err(auth_error)?;

    let jar = jar.add(session_cookie(&state, session));
    Ok((jar, (StatusCode::CREATED, Json(UserResponse::from(user)))))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
    let result = auth_service(&state)
        .login(
            &body.username,
            &body.password,
            user_agent.map(|TypedHeader(ua)| ua.to_string()),
        )
        .await;

    metrics::record_login_attempt(result.is_ok());
    let (user, session) = result.map_err(auth_error)?;

    let jar = jar.add(session_cookie(&state, session));
    Ok((jar, Json(UserResponse::from(user))))
}

/// Logout (drop the current session)
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cookie_name = state.settings.session.cookie_name.clone();

    if let Some(token) = session_token(&headers, &cookie_name) {
        if let Err(e) = auth_service(&state).logout(&token).await {
            tracing::warn!(error = %e, "Failed to delete session on logout");
        }
    }

    let mut removal = Cookie::from(cookie_name);
    removal.set_path("/");
    (jar.remove(removal), Json(MessageResponse::new("Logged out")))
}

/// Current user
pub async fn current_user(Extension(auth): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse::from(auth.user))
}
