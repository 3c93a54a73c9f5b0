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
        booking::InvoiceDto,
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::invoice::InvoiceService,
    },
};

pub static INVOICE_TAG: &str = "invoices";

#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = INVOICE_TAG,
    responses(
        (status = 200, description = "Invoices of the signed in family or educator", body = Vec<InvoiceDto>),
        (status = 401, description = "No user in session", body = ErrorDto)
    ),
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let invoices = InvoiceService::new(&state).list_for_user(&user).await?;

    Ok((StatusCode::OK, Json(invoices)))
}

/// Short-lived download URL of an invoice PDF
#[utoipa::path(
    get,
    path = "/api/invoices/{invoice_id}/pdf",
    tag = INVOICE_TAG,
    params(("invoice_id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Signed URL", body = SignedUrlDto),
        (status = 404, description = "Invoice or its PDF not found", body = ErrorDto),
        (status = 502, description = "Storage signing failed", body = ErrorDto)
    ),
)]
pub async fn get_invoice_pdf(
    State(state): State<AppState>,
    session: Session,
    Path(invoice_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let url = InvoiceService::new(&state)
        .pdf_url(&user, invoice_id)
        .await?;

    Ok((StatusCode::OK, Json(url)))
}
