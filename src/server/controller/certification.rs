use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SignedUrlDto},
        content::{CertificationDto, CertificationInput},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{media::Upload, moderation::certification::CertificationService},
    },
};

pub static CERTIFICATION_TAG: &str = "certifications";

#[utoipa::path(
    get,
    path = "/api/educator/certifications",
    tag = CERTIFICATION_TAG,
    responses(
        (status = 200, description = "Certifications of the signed in educator", body = Vec<CertificationDto>),
        (status = 403, description = "Educators only", body = ErrorDto)
    ),
)]
pub async fn list_certifications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let certifications = CertificationService::new(&state).list_own(&user).await?;

    Ok((StatusCode::OK, Json(certifications)))
}

/// Declare a certification; it stays pending until an admin reviews it
#[utoipa::path(
    post,
    path = "/api/educator/certifications",
    tag = CERTIFICATION_TAG,
    request_body = CertificationInput,
    responses(
        (status = 201, description = "Certification created", body = CertificationDto),
        (status = 400, description = "Invalid certification", body = ErrorDto),
        (status = 403, description = "Educators only", body = ErrorDto)
    ),
)]
pub async fn create_certification(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CertificationInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let certification = CertificationService::new(&state)
        .create(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(certification)))
}

/// Edit a certification, sending it back to review
#[utoipa::path(
    put,
    path = "/api/educator/certifications/{certification_id}",
    tag = CERTIFICATION_TAG,
    params(("certification_id" = i32, Path, description = "Certification ID")),
    request_body = CertificationInput,
    responses(
        (status = 200, description = "Certification updated", body = CertificationDto),
        (status = 400, description = "Invalid certification", body = ErrorDto),
        (status = 404, description = "Certification not found", body = ErrorDto)
    ),
)]
pub async fn update_certification(
    State(state): State<AppState>,
    session: Session,
    Path(certification_id): Path<i32>,
    Json(payload): Json<CertificationInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let certification = CertificationService::new(&state)
        .update(&user, certification_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(certification)))
}

/// Attach the diploma scan as the raw request body
#[utoipa::path(
    post,
    path = "/api/educator/certifications/{certification_id}/document",
    tag = CERTIFICATION_TAG,
    params(("certification_id" = i32, Path, description = "Certification ID")),
    request_body(content = Vec<u8>, description = "application/pdf, image/jpeg or image/png, at most 10 MiB", content_type = "application/pdf"),
    responses(
        (status = 200, description = "Document stored", body = CertificationDto),
        (status = 400, description = "Unsupported type or file too large", body = ErrorDto),
        (status = 404, description = "Certification not found", body = ErrorDto),
        (status = 502, description = "Storage upload failed", body = ErrorDto)
    ),
)]
pub async fn upload_certification_document(
    State(state): State<AppState>,
    session: Session,
    Path(certification_id): Path<i32>,
    upload: Upload,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let certification = CertificationService::new(&state)
        .upload_document(&user, certification_id, upload)
        .await?;

    Ok((StatusCode::OK, Json(certification)))
}

/// Short-lived URL of a certification document, for its owner or an admin
#[utoipa::path(
    get,
    path = "/api/certifications/{certification_id}/document",
    tag = CERTIFICATION_TAG,
    params(("certification_id" = i32, Path, description = "Certification ID")),
    responses(
        (status = 200, description = "Signed URL", body = SignedUrlDto),
        (status = 404, description = "Certification or document not found", body = ErrorDto),
        (status = 502, description = "Storage signing failed", body = ErrorDto)
    ),
)]
pub async fn get_certification_document(
    State(state): State<AppState>,
    session: Session,
    Path(certification_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let url = CertificationService::new(&state)
        .document_url(&user, certification_id)
        .await?;

    Ok((StatusCode::OK, Json(url)))
}
