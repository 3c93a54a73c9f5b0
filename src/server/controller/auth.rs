use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{PasswordResetDto, SessionLoginDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::auth::{user_dto, AuthService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Opens a session from a Supabase access token
///
/// The first sign in creates the account; `role` is required then unless the email belongs
/// to an administrator.
#[utoipa::path(
    post,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    request_body = SessionLoginDto,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 400, description = "New account without a family or educator role", body = ErrorDto),
        (status = 401, description = "Access token rejected", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SessionLoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state)
        .sign_in(&payload.access_token, payload.role)
        .await?;

    SessionUserId::sign_in(&session, user.id).await?;

    Ok((StatusCode::OK, Json(user_dto(user))))
}

/// Returns the signed in user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Success when retrieving user information", body = UserDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(user_dto(user))))
}

/// Logs the user out by clearing their session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Session cleared"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Clearing a session that was never stored fails on the Redis store
    if SessionUserId::get(&session).await?.is_some() {
        session.clear().await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Sets a new password for the owner of a Supabase recovery access token
#[utoipa::path(
    post,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = PasswordResetDto,
    responses(
        (status = 204, description = "Password updated"),
        (status = 400, description = "Password too weak", body = ErrorDto),
        (status = 401, description = "Access token rejected", body = ErrorDto),
        (status = 502, description = "Supabase Auth rejected the update", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetDto>,
) -> Result<impl IntoResponse, Error> {
    AuthService::new(&state)
        .reset_password(&payload.access_token, &payload.password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
