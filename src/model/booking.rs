use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CheckoutRequestDto {
    pub educator_id: i32,
    pub child_id: Option<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CheckoutResponseDto {
    pub appointment_id: i32,
    pub checkout_url: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub educator_id: i32,
    pub family_id: i32,
    pub child_id: Option<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[schema(value_type = String)]
    pub status: AppointmentStatus,
    #[schema(value_type = String)]
    pub payment_status: PaymentStatus,
    pub amount_cents: i64,
    /// Only disclosed to the family that booked the appointment
    pub pin_code: Option<String>,
    pub pin_expires_at: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AvailableSlotsDto {
    pub educator_id: i32,
    pub date: NaiveDate,
    pub slots: Vec<NaiveTime>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PinValidationDto {
    pub pin: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InvoiceDto {
    pub id: i32,
    pub appointment_id: i32,
    pub invoice_number: Option<String>,
    pub total_cents: i64,
    pub commission_cents: i64,
    pub processor_fee_cents: i64,
    pub net_cents: i64,
    pub has_pdf: bool,
    pub issued_at: NaiveDateTime,
}
