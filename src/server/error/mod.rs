//! Error types for the Carelink server application.
//!
//! This module provides the error taxonomy used by every layer of the server. Domain errors
//! (authentication, configuration, booking, moderation, external providers) live in their own
//! submodules and are aggregated into [`Error`]. All errors implement `IntoResponse` so
//! controllers can return them directly, and use `thiserror` for their `Display` and
//! `Error` implementations.

pub mod auth;
pub mod booking;
pub mod config;
pub mod moderation;
pub mod provider;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, booking::BookingError, config::ConfigError, moderation::ModerationError,
        provider::ProviderError,
    },
};

/// Main error type for the Carelink server application.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type. `#[from]` conversions let the `?` operator lift repository, session and provider
/// errors without ceremony. The `IntoResponse` implementation maps each category to the
/// HTTP status documented on its variant.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, access token, account role).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Booking error (slot availability, appointment transitions, PIN checks).
    #[error(transparent)]
    BookingError(#[from] BookingError),
    /// Moderation error (review transitions, missing rejection reasons).
    #[error(transparent)]
    ModerationError(#[from] ModerationError),
    /// External provider error (Stripe, Resend, Supabase).
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// Client supplied invalid input; the message is returned to the client (400).
    #[error("{0}")]
    Validation(String),
    /// Requested record does not exist or is not visible to the caller (404).
    #[error("{0} not found")]
    NotFound(String),
    /// Caller is authenticated but not allowed to perform the action (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Carelink's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// PDF rendering error.
    #[error(transparent)]
    PdfError(#[from] printpdf::Error),
    /// I/O error (binding the listener, serving connections).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures and domain rule violations
/// - 401 Unauthorized - Missing session or invalid access token
/// - 403 Forbidden - Role or ownership violations
/// - 404 Not Found - Missing records
/// - 502 Bad Gateway - External provider failures
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::BookingError(err) => err.into_response(),
            Self::ModerationError(err) => err.into_response(),
            Self::ProviderError(err) => err.into_response(),
            Self::Validation(message) => {
                tracing::debug!("Validation error: {}", message);

                error_response(StatusCode::BAD_REQUEST, message)
            }
            Self::NotFound(what) => {
                tracing::debug!("{} not found", what);

                error_response(StatusCode::NOT_FOUND, format!("{} not found", what))
            }
            Self::Forbidden(reason) => {
                tracing::debug!("Forbidden: {}", reason);

                error_response(StatusCode::FORBIDDEN, reason)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the provided status and message.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::server::error::{auth::AuthError, booking::BookingError, Error};

    #[test]
    fn maps_validation_to_bad_request() {
        let resp = Error::Validation("Title is required".to_string()).into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn maps_not_found_to_404() {
        let resp = Error::NotFound("Appointment 4".to_string()).into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn maps_forbidden_to_403() {
        let resp = Error::Forbidden("Educators only".to_string()).into_response();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn maps_nested_domain_errors() {
        let resp = Error::AuthError(AuthError::UserNotInSession).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = Error::BookingError(BookingError::PinLocked).into_response();
        assert_eq!(resp.status(), StatusCode::LOCKED);
    }

    #[test]
    fn hides_internal_errors() {
        let resp = Error::InternalError("invariant broken".to_string()).into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
