//! Authentication endpoints
//!
//! Login opens a server-side session and hands its id back in an HttpOnly
//! cookie; every other endpoint reads that cookie through
//! [`AuthenticatedSession`].

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::AppResult,
    models::{user::LoginRequest, User},
};

use super::AuthenticatedSession;

/// Login with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = User),
        (status = 401, description = "Wrong username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<User>)> {
    let (session, user) = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    let sessions = &state.config.sessions;
    let cookie = Cookie::build((sessions.cookie_name.clone(), session.id))
        .path("/")
        .http_only(true)
        .secure(sessions.secure_cookie)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(user)))
}

/// Logout and drop the session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    state.services.auth.logout(&session).await?;

    let cookie = Cookie::build((state.config.sessions.cookie_name.clone(), "")).path("/");
    Ok((jar.remove(cookie), StatusCode::NO_CONTENT))
}

/// Get current user info
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> AppResult<Json<User>> {
    let user = state.services.auth.me(&session).await?;
    Ok(Json(user))
}
