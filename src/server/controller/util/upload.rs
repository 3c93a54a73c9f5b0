use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::server::{error::Error, service::media::Upload};

/// Largest request body accepted by upload routes; per-kind limits are checked by the service.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Reads a file sent as the raw request body, typed by its `Content-Type` header.
impl<S> FromRequest<S> for Upload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Validation("A Content-Type header is required".to_string()).into_response()
            })?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Upload {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
