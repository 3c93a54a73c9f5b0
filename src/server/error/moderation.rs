use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("A rejection reason is required")]
    ReasonRequired,
    #[error("{item} is not awaiting review")]
    NotPending { item: &'static str },
    #[error("{item} cannot be {action} in its current state")]
    InvalidTransition {
        item: &'static str,
        action: &'static str,
    },
}

impl IntoResponse for ModerationError {
    fn into_response(self) -> Response {
        tracing::debug!("Moderation error: {}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
