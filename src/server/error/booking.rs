//! Booking and appointment lifecycle errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum BookingError {
    /// Requested start time is not among the educator's free slots.
    #[error("The requested time slot is not available")]
    SlotUnavailable,
    /// Appointment is not in a status that allows the requested action.
    #[error("Cannot {action} an appointment that is {status:?}")]
    InvalidTransition {
        action: &'static str,
        status: AppointmentStatus,
    },
    /// Payment is not in the state the action requires.
    #[error("Cannot {action} while payment is {status:?}")]
    InvalidPaymentState {
        action: &'static str,
        status: PaymentStatus,
    },
    /// Stripe reports the checkout session as not completed yet.
    #[error("Checkout session has not been completed")]
    CheckoutIncomplete,
    #[error("The PIN code has expired")]
    PinExpired,
    #[error("Too many incorrect PIN attempts")]
    PinLocked,
    #[error("Incorrect PIN code, {remaining} attempt(s) remaining")]
    PinMismatch { remaining: i32 },
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        tracing::debug!("Booking error: {}", self);

        let status = match self {
            Self::PinExpired => StatusCode::GONE,
            Self::PinLocked => StatusCode::LOCKED,
            _ => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}
