use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Access token rejected: {0}")]
    InvalidAccessToken(#[from] jsonwebtoken::errors::Error),
    #[error("A role of family or educator is required to create an account")]
    RoleRequired,
}

impl AuthError {
    fn unauthorized() -> Response {
        error_response(StatusCode::UNAUTHORIZED, "You need to sign in to do that")
    }

    fn user_not_found() -> Response {
        error_response(StatusCode::NOT_FOUND, "User not found")
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                Self::unauthorized()
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(
                    user_id = %user_id,
                    "{}",
                    self
                );

                Self::user_not_found()
            }
            Self::InvalidAccessToken(ref err) => {
                tracing::debug!("Access token rejected: {}", err);

                Self::unauthorized()
            }
            Self::RoleRequired => error_response(StatusCode::BAD_REQUEST, self.to_string()),
        }
    }
}
