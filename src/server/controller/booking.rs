use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        booking::{AppointmentDto, CheckoutRequestDto, CheckoutResponseDto, PinValidationDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::booking::BookingService,
    },
};

pub static BOOKING_TAG: &str = "appointments";

/// Book a slot and open a Stripe checkout authorizing the payment
///
/// The payment is only authorized here; it is captured once the educator validates the
/// family's PIN at the end of the session.
#[utoipa::path(
    post,
    path = "/api/appointments/checkout",
    tag = BOOKING_TAG,
    request_body = CheckoutRequestDto,
    responses(
        (status = 201, description = "Appointment created, redirect the family to the checkout URL", body = CheckoutResponseDto),
        (status = 400, description = "Invalid request or slot no longer available", body = ErrorDto),
        (status = 403, description = "Families only", body = ErrorDto),
        (status = 404, description = "Educator or child not found", body = ErrorDto),
        (status = 502, description = "Stripe rejected the checkout", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckoutRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let checkout = BookingService::new(&state).checkout(&user, payload).await?;

    Ok((StatusCode::CREATED, Json(checkout)))
}

/// Confirm the payment authorization after the Stripe redirect
///
/// Repeated calls on an authorized appointment return it unchanged.
#[utoipa::path(
    post,
    path = "/api/appointments/{appointment_id}/payment/confirm",
    tag = BOOKING_TAG,
    params(("appointment_id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Payment authorized", body = AppointmentDto),
        (status = 400, description = "Checkout not completed", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 502, description = "Stripe request failed", body = ErrorDto)
    ),
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    session: Session,
    Path(appointment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let appointment = BookingService::new(&state)
        .confirm_payment(&user, appointment_id)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

/// Appointments of the signed in family or educator
///
/// The PIN is only included for the family.
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Appointments, most recent first", body = Vec<AppointmentDto>),
        (status = 401, description = "No user in session", body = ErrorDto)
    ),
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let appointments = BookingService::new(&state).list_for_user(&user).await?;

    Ok((StatusCode::OK, Json(appointments)))
}

#[utoipa::path(
    post,
    path = "/api/appointments/{appointment_id}/accept",
    tag = BOOKING_TAG,
    params(("appointment_id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment accepted", body = AppointmentDto),
        (status = 400, description = "Appointment is not pending", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto)
    ),
)]
pub async fn accept(
    State(state): State<AppState>,
    session: Session,
    Path(appointment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let appointment = BookingService::new(&state)
        .accept(&user, appointment_id)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

/// Decline a pending appointment, releasing any authorized payment
#[utoipa::path(
    post,
    path = "/api/appointments/{appointment_id}/decline",
    tag = BOOKING_TAG,
    params(("appointment_id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment declined", body = AppointmentDto),
        (status = 400, description = "Appointment is not pending", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 502, description = "Stripe refused to cancel the payment", body = ErrorDto)
    ),
)]
pub async fn decline(
    State(state): State<AppState>,
    session: Session,
    Path(appointment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let appointment = BookingService::new(&state)
        .decline(&user, appointment_id)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

/// Cancel a pending or accepted appointment, by either party
#[utoipa::path(
    post,
    path = "/api/appointments/{appointment_id}/cancel",
    tag = BOOKING_TAG,
    params(("appointment_id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentDto),
        (status = 400, description = "Appointment can no longer be cancelled", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 502, description = "Stripe refused to cancel the payment", body = ErrorDto)
    ),
)]
pub async fn cancel(
    State(state): State<AppState>,
    session: Session,
    Path(appointment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let appointment = BookingService::new(&state)
        .cancel(&user, appointment_id)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

/// Validate the family's PIN, capturing the payment and completing the appointment
#[utoipa::path(
    post,
    path = "/api/appointments/{appointment_id}/pin",
    tag = BOOKING_TAG,
    params(("appointment_id" = i32, Path, description = "Appointment ID")),
    request_body = PinValidationDto,
    responses(
        (status = 200, description = "PIN accepted, payment captured", body = AppointmentDto),
        (status = 400, description = "Wrong PIN or appointment not ready for capture", body = ErrorDto),
        (status = 404, description = "Appointment not found", body = ErrorDto),
        (status = 410, description = "PIN expired", body = ErrorDto),
        (status = 423, description = "Too many wrong attempts", body = ErrorDto),
        (status = 502, description = "Stripe capture failed", body = ErrorDto)
    ),
)]
pub async fn validate_pin(
    State(state): State<AppState>,
    session: Session,
    Path(appointment_id): Path<i32>,
    Json(payload): Json<PinValidationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let appointment = BookingService::new(&state)
        .validate_pin(&user, appointment_id, &payload.pin)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}
