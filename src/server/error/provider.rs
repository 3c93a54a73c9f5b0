//! Errors raised by the external service clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure or undecodable response body.
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// Provider answered with a non-success status.
    #[error("{provider} returned {status}: {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },
    /// Provider answered successfully but without a field we rely on.
    #[error("{provider} response is missing {field}")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        error_response(
            StatusCode::BAD_GATEWAY,
            "An external service failed to process the request, please try again later.",
        )
    }
}
