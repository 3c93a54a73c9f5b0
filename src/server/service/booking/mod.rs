//! Appointment booking, payment authorization and the appointment lifecycle.
//!
//! Payments use Stripe manual capture: checkout only authorizes the amount, which is captured
//! when the educator enters the family's PIN at the end of the session, or released when the
//! appointment is declined, cancelled or expires.

pub mod pin;

#[cfg(test)]
mod tests;

use chrono::{Duration, NaiveDateTime, NaiveTime, Utc};
use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus, UserRole};

use crate::{
    model::booking::{AppointmentDto, CheckoutRequestDto, CheckoutResponseDto},
    server::{
        data::{
            appointment::{AppointmentRepository, NewAppointment},
            availability::AvailabilityRepository,
            child::ChildRepository,
            educator_profile::EducatorProfileRepository,
            family_profile::FamilyProfileRepository,
        },
        error::{booking::BookingError, provider::ProviderError, Error},
        model::app::AppState,
        provider::stripe::PaymentCheckout,
        service::{
            availability::AvailabilityService,
            booking::pin::{generate_pin, MAX_PIN_ATTEMPTS},
            invoice::InvoiceService,
            notification,
            profile::{require_educator, require_family},
            validate::{max_chars, optional_text},
        },
        util::{
            profession::profession_label,
            time::{is_slot_aligned, minutes_between, pin_expiry, weekday_index, SLOT_MINUTES},
        },
    },
};

const MAX_NOTES_CHARS: usize = 2000;

/// Checks a PIN entry against an appointment.
///
/// Expiry is checked before the lock, so an expired PIN always reports as expired.
///
/// # Returns
/// - `Ok(())` - The PIN matches
/// - `Err(BookingError::PinExpired)` - `now` is past `pin_expires_at`
/// - `Err(BookingError::PinLocked)` - The maximum number of wrong attempts was reached
/// - `Err(BookingError::PinMismatch)` - Wrong PIN, with the attempts left after this one
pub fn check_pin(
    appointment: &entity::appointment::Model,
    pin: &str,
    now: NaiveDateTime,
) -> Result<(), BookingError> {
    if now > appointment.pin_expires_at {
        return Err(BookingError::PinExpired);
    }
    if appointment.pin_attempts >= MAX_PIN_ATTEMPTS {
        return Err(BookingError::PinLocked);
    }
    if pin.trim() != appointment.pin_code {
        return Err(BookingError::PinMismatch {
            remaining: MAX_PIN_ATTEMPTS - appointment.pin_attempts - 1,
        });
    }

    Ok(())
}

/// Converts an appointment for the API; the PIN is only disclosed to the family.
pub fn appointment_dto(appointment: entity::appointment::Model, reveal_pin: bool) -> AppointmentDto {
    AppointmentDto {
        id: appointment.id,
        educator_id: appointment.educator_id,
        family_id: appointment.family_id,
        child_id: appointment.child_id,
        date: appointment.date,
        start_time: appointment.start_time,
        end_time: appointment.end_time,
        status: appointment.status,
        payment_status: appointment.payment_status,
        amount_cents: appointment.amount_cents,
        pin_code: reveal_pin.then_some(appointment.pin_code),
        pin_expires_at: appointment.pin_expires_at,
        notes: appointment.notes,
        created_at: appointment.created_at,
    }
}

/// Price of `minutes` at `hourly_rate_cents`, in cents.
pub fn appointment_amount(hourly_rate_cents: i64, minutes: i64) -> i64 {
    hourly_rate_cents * minutes / 60
}

/// Which side of an appointment the caller is on.
#[derive(Clone, Copy)]
enum Side {
    Educator,
    Family,
}

pub struct BookingService<'a> {
    state: &'a AppState,
}

impl<'a> BookingService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Creates a pending appointment and a manual capture checkout session for it.
    ///
    /// The appointment is written before the checkout session exists. If Stripe refuses the
    /// session the appointment is kept as `cancelled` with a `failed` payment and the provider
    /// error is returned.
    pub async fn checkout(
        &self,
        user: &entity::app_user::Model,
        request: CheckoutRequestDto,
    ) -> Result<CheckoutResponseDto, Error> {
        let db = &self.state.db;

        let family = require_family(db, user).await?;
        let (educator, _) = EducatorProfileRepository::new(db)
            .get_approved_with_user(request.educator_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Educator {}", request.educator_id)))?;

        if request.date < Utc::now().date_naive() {
            return Err(Error::Validation(
                "Appointments cannot be booked in the past".to_string(),
            ));
        }
        if !is_slot_aligned(request.start_time) {
            return Err(Error::Validation(format!(
                "Appointments start on a {} minute boundary",
                SLOT_MINUTES
            )));
        }
        let minutes = minutes_between(request.start_time, request.end_time);
        if minutes <= 0 {
            return Err(Error::Validation(
                "Appointment must end after it starts".to_string(),
            ));
        }
        if minutes % SLOT_MINUTES != 0 {
            return Err(Error::Validation(format!(
                "Appointment duration must be a multiple of {} minutes",
                SLOT_MINUTES
            )));
        }

        if let Some(child_id) = request.child_id {
            ChildRepository::new(db)
                .get_for_family(child_id, family.id)
                .await?
                .ok_or_else(|| Error::NotFound(format!("Child {}", child_id)))?;
        }

        let notes = optional_text(request.notes);
        if let Some(notes) = &notes {
            max_chars("Notes", notes, MAX_NOTES_CHARS)?;
        }

        let windows = AvailabilityRepository::new(db)
            .list_for_day(educator.id, weekday_index(request.date))
            .await?;
        let inside_window = windows.iter().any(|window| {
            window.start_time <= request.start_time && request.end_time <= window.end_time
        });
        if !inside_window {
            return Err(BookingError::SlotUnavailable.into());
        }

        let slots = AvailabilityService::new(db)
            .slots_for(educator.id, request.date)
            .await?;
        let all_free = increments(request.start_time, minutes)
            .iter()
            .all(|start| slots.contains(start));
        if !all_free {
            return Err(BookingError::SlotUnavailable.into());
        }
        // Slots only hide booked start times, so a request may begin inside a booking
        let overlaps = AppointmentRepository::new(db)
            .overlaps_booking(
                educator.id,
                request.date,
                request.start_time,
                request.end_time,
            )
            .await?;
        if overlaps {
            return Err(BookingError::SlotUnavailable.into());
        }

        let customer_id = match family.stripe_customer_id.clone() {
            Some(customer_id) => customer_id,
            None => {
                let customer = self
                    .state
                    .stripe
                    .find_or_create_customer(
                        &user.email,
                        &format!("{} {}", family.first_name, family.last_name),
                    )
                    .await?;
                FamilyProfileRepository::new(db)
                    .set_stripe_customer(family.clone(), customer.id.clone())
                    .await?;
                customer.id
            }
        };

        let amount_cents = appointment_amount(educator.hourly_rate_cents, minutes);
        let appointment_repo = AppointmentRepository::new(db);
        let appointment = appointment_repo
            .create(NewAppointment {
                educator_id: educator.id,
                family_id: family.id,
                child_id: request.child_id,
                date: request.date,
                start_time: request.start_time,
                end_time: request.end_time,
                amount_cents,
                pin_code: generate_pin(),
                pin_expires_at: pin_expiry(request.date, request.start_time),
                notes,
            })
            .await?;

        let description = format!(
            "{} with {} {} on {} {}-{}",
            profession_label(&educator.profession_code),
            educator.first_name,
            educator.last_name,
            request.date.format("%d/%m/%Y"),
            request.start_time.format("%H:%M"),
            request.end_time.format("%H:%M")
        );
        let checkout = self
            .state
            .stripe
            .create_payment_checkout(PaymentCheckout {
                customer_id: &customer_id,
                amount_cents,
                description: &description,
                appointment_id: appointment.id,
                success_url: format!(
                    "{}/appointments/{}/confirm?session_id={{CHECKOUT_SESSION_ID}}",
                    self.state.app_url, appointment.id
                ),
                cancel_url: format!("{}/educators/{}", self.state.app_url, educator.id),
            })
            .await;

        let session = match checkout {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    "Checkout session creation failed, cancelling appointment: {}",
                    err
                );

                appointment_repo
                    .set_status(
                        appointment,
                        AppointmentStatus::Cancelled,
                        PaymentStatus::Failed,
                    )
                    .await?;

                return Err(err.into());
            }
        };

        let appointment = appointment_repo
            .set_checkout_session(appointment, session.id)
            .await?;
        let checkout_url = session.url.ok_or(ProviderError::MissingField {
            provider: "Stripe",
            field: "url",
        })?;

        tracing::info!(
            appointment_id = %appointment.id,
            educator_id = %educator.id,
            family_id = %family.id,
            amount_cents = %amount_cents,
            "Created appointment checkout"
        );

        Ok(CheckoutResponseDto {
            appointment_id: appointment.id,
            checkout_url,
        })
    }

    /// Records the authorization of a completed checkout and notifies both participants.
    ///
    /// Calling this again once the payment is authorized returns the appointment unchanged.
    pub async fn confirm_payment(
        &self,
        user: &entity::app_user::Model,
        appointment_id: i32,
    ) -> Result<AppointmentDto, Error> {
        let db = &self.state.db;
        let family = require_family(db, user).await?;
        let appointment = self.get_for_family(appointment_id, family.id).await?;

        match appointment.payment_status {
            PaymentStatus::Authorized => return Ok(appointment_dto(appointment, true)),
            PaymentStatus::Pending => {}
            status => {
                return Err(BookingError::InvalidPaymentState {
                    action: "confirm the payment",
                    status,
                }
                .into())
            }
        }
        if appointment.status != AppointmentStatus::Pending {
            return Err(BookingError::InvalidTransition {
                action: "confirm the payment of",
                status: appointment.status,
            }
            .into());
        }

        let session_id = appointment
            .stripe_checkout_session_id
            .clone()
            .ok_or_else(|| Error::Validation("Checkout was never started".to_string()))?;
        let session = self
            .state
            .stripe
            .retrieve_checkout_session(&session_id)
            .await?;

        if session.status.as_deref() != Some("complete") {
            return Err(BookingError::CheckoutIncomplete.into());
        }
        let payment_intent_id = session.payment_intent.ok_or(ProviderError::MissingField {
            provider: "Stripe",
            field: "payment_intent",
        })?;

        let appointment = AppointmentRepository::new(db)
            .authorize_payment(appointment, payment_intent_id)
            .await?;

        tracing::info!(appointment_id = %appointment.id, "Payment authorized");

        self.send_booking_emails(&appointment, user, &family).await;

        Ok(appointment_dto(appointment, true))
    }

    async fn send_booking_emails(
        &self,
        appointment: &entity::appointment::Model,
        family_user: &entity::app_user::Model,
        family: &entity::family_profile::Model,
    ) {
        let educator = match EducatorProfileRepository::new(&self.state.db)
            .get_with_user(appointment.educator_id)
            .await
        {
            Ok(Some(educator)) => educator,
            Ok(None) => {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    "Educator not found, skipping booking emails"
                );
                return;
            }
            Err(err) => {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    "Failed to load educator for booking emails: {}",
                    err
                );
                return;
            }
        };
        let (educator, educator_user) = educator;
        let app_url = &self.state.app_url;

        notification::send_best_effort(
            &self.state.mailer,
            notification::booking_confirmation(
                &family_user.email,
                &format!("{} {}", educator.first_name, educator.last_name),
                appointment,
                app_url,
            ),
        )
        .await;

        if let Some(educator_user) = educator_user {
            notification::send_best_effort(
                &self.state.mailer,
                notification::new_booking(
                    &educator_user.email,
                    &format!("{} {}", family.first_name, family.last_name),
                    appointment,
                    app_url,
                ),
            )
            .await;
        }
    }

    /// Appointments of the calling educator or family, most recent first.
    pub async fn list_for_user(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<AppointmentDto>, Error> {
        let db = &self.state.db;
        let repo = AppointmentRepository::new(db);

        match user.role {
            UserRole::Educator => {
                let educator = require_educator(db, user).await?;
                let appointments = repo.list_for_educator(educator.id).await?;

                Ok(appointments
                    .into_iter()
                    .map(|appointment| appointment_dto(appointment, false))
                    .collect())
            }
            UserRole::Family => {
                let family = require_family(db, user).await?;
                let appointments = repo.list_for_family(family.id).await?;

                Ok(appointments
                    .into_iter()
                    .map(|appointment| appointment_dto(appointment, true))
                    .collect())
            }
            UserRole::Admin => Err(Error::Forbidden(
                "Only educators and families have appointments".to_string(),
            )),
        }
    }

    /// Educator accepts a pending appointment whose payment is authorized.
    pub async fn accept(
        &self,
        user: &entity::app_user::Model,
        appointment_id: i32,
    ) -> Result<AppointmentDto, Error> {
        let educator = require_educator(&self.state.db, user).await?;
        let appointment = self.get_for_educator(appointment_id, educator.id).await?;

        if appointment.status != AppointmentStatus::Pending {
            return Err(BookingError::InvalidTransition {
                action: "accept",
                status: appointment.status,
            }
            .into());
        }
        if appointment.payment_status != PaymentStatus::Authorized {
            return Err(BookingError::InvalidPaymentState {
                action: "accept the appointment",
                status: appointment.payment_status,
            }
            .into());
        }

        let appointment = AppointmentRepository::new(&self.state.db)
            .set_status(
                appointment,
                AppointmentStatus::Accepted,
                PaymentStatus::Authorized,
            )
            .await?;

        tracing::info!(appointment_id = %appointment.id, "Appointment accepted");

        Ok(appointment_dto(appointment, false))
    }

    /// Educator declines a pending appointment, releasing any authorized payment.
    pub async fn decline(
        &self,
        user: &entity::app_user::Model,
        appointment_id: i32,
    ) -> Result<AppointmentDto, Error> {
        let educator = require_educator(&self.state.db, user).await?;
        let appointment = self.get_for_educator(appointment_id, educator.id).await?;

        if appointment.status != AppointmentStatus::Pending {
            return Err(BookingError::InvalidTransition {
                action: "decline",
                status: appointment.status,
            }
            .into());
        }

        let payment_status = self.release_payment(&appointment).await?;
        let appointment = AppointmentRepository::new(&self.state.db)
            .set_status(appointment, AppointmentStatus::Declined, payment_status)
            .await?;

        tracing::info!(appointment_id = %appointment.id, "Appointment declined");

        self.notify_cancellation(&appointment, Side::Family).await;

        Ok(appointment_dto(appointment, false))
    }

    /// Either participant cancels a pending or accepted appointment, releasing any authorized
    /// payment.
    pub async fn cancel(
        &self,
        user: &entity::app_user::Model,
        appointment_id: i32,
    ) -> Result<AppointmentDto, Error> {
        let db = &self.state.db;

        let (appointment, side) = match user.role {
            UserRole::Educator => {
                let educator = require_educator(db, user).await?;
                (
                    self.get_for_educator(appointment_id, educator.id).await?,
                    Side::Educator,
                )
            }
            UserRole::Family => {
                let family = require_family(db, user).await?;
                (
                    self.get_for_family(appointment_id, family.id).await?,
                    Side::Family,
                )
            }
            UserRole::Admin => {
                return Err(Error::Forbidden(
                    "Only participants can cancel an appointment".to_string(),
                ))
            }
        };

        if !matches!(
            appointment.status,
            AppointmentStatus::Pending | AppointmentStatus::Accepted
        ) {
            return Err(BookingError::InvalidTransition {
                action: "cancel",
                status: appointment.status,
            }
            .into());
        }

        let payment_status = self.release_payment(&appointment).await?;
        let appointment = AppointmentRepository::new(db)
            .set_status(appointment, AppointmentStatus::Cancelled, payment_status)
            .await?;

        tracing::info!(appointment_id = %appointment.id, "Appointment cancelled");

        let counterpart = match side {
            Side::Educator => Side::Family,
            Side::Family => Side::Educator,
        };
        self.notify_cancellation(&appointment, counterpart).await;

        let reveal_pin = matches!(side, Side::Family);
        Ok(appointment_dto(appointment, reveal_pin))
    }

    /// Educator enters the PIN given by the family; a match captures the payment, completes
    /// the appointment and issues its invoice.
    ///
    /// Invoice failures are logged and do not undo the capture.
    pub async fn validate_pin(
        &self,
        user: &entity::app_user::Model,
        appointment_id: i32,
        pin: &str,
    ) -> Result<AppointmentDto, Error> {
        let db = &self.state.db;
        let educator = require_educator(db, user).await?;
        let appointment = self.get_for_educator(appointment_id, educator.id).await?;

        if appointment.status != AppointmentStatus::Accepted {
            return Err(BookingError::InvalidTransition {
                action: "validate the PIN of",
                status: appointment.status,
            }
            .into());
        }
        if appointment.payment_status != PaymentStatus::Authorized {
            return Err(BookingError::InvalidPaymentState {
                action: "validate the PIN",
                status: appointment.payment_status,
            }
            .into());
        }

        let repo = AppointmentRepository::new(db);
        match check_pin(&appointment, pin, Utc::now().naive_utc()) {
            Ok(()) => {}
            Err(err @ BookingError::PinMismatch { .. }) => {
                let appointment = repo.record_failed_pin_attempt(appointment).await?;
                tracing::debug!(
                    appointment_id = %appointment.id,
                    attempts = %appointment.pin_attempts,
                    "Wrong PIN entered"
                );

                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        }

        let payment_intent_id = appointment
            .stripe_payment_intent_id
            .clone()
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Appointment {} is authorized without a payment intent",
                    appointment.id
                ))
            })?;
        self.state
            .stripe
            .capture_payment_intent(&payment_intent_id)
            .await?;

        let appointment = repo
            .set_status(
                appointment,
                AppointmentStatus::Completed,
                PaymentStatus::Captured,
            )
            .await?;

        tracing::info!(appointment_id = %appointment.id, "Payment captured");

        if let Err(err) = InvoiceService::new(self.state).generate(&appointment).await {
            tracing::warn!(
                appointment_id = %appointment.id,
                "Failed to generate invoice after capture: {}",
                err
            );
        }

        Ok(appointment_dto(appointment, false))
    }

    /// Releases authorizations whose PIN expired before `now`; the appointments become
    /// `expired` with a `cancelled` payment.
    ///
    /// Failures are logged per appointment and do not stop the batch. Returns the number of
    /// appointments expired.
    pub async fn expire_stale_authorizations(&self, now: NaiveDateTime) -> Result<usize, Error> {
        let repo = AppointmentRepository::new(&self.state.db);
        let stale = repo.find_expired_authorized(now).await?;

        let mut expired = 0;
        for appointment in stale {
            let appointment_id = appointment.id;

            match self.expire(appointment).await {
                Ok(()) => expired += 1,
                Err(err) => {
                    tracing::warn!(
                        appointment_id = %appointment_id,
                        "Failed to expire appointment: {}",
                        err
                    );
                }
            }
        }

        Ok(expired)
    }

    async fn expire(&self, appointment: entity::appointment::Model) -> Result<(), Error> {
        if let Some(payment_intent_id) = &appointment.stripe_payment_intent_id {
            self.state
                .stripe
                .cancel_payment_intent(payment_intent_id)
                .await?;
        }

        let appointment = AppointmentRepository::new(&self.state.db)
            .set_status(
                appointment,
                AppointmentStatus::Expired,
                PaymentStatus::Cancelled,
            )
            .await?;

        tracing::info!(appointment_id = %appointment.id, "Appointment expired");

        Ok(())
    }

    /// Cancels an authorized payment intent; returns the payment status to store.
    async fn release_payment(
        &self,
        appointment: &entity::appointment::Model,
    ) -> Result<PaymentStatus, Error> {
        match (
            appointment.payment_status,
            &appointment.stripe_payment_intent_id,
        ) {
            (PaymentStatus::Authorized, Some(payment_intent_id)) => {
                self.state
                    .stripe
                    .cancel_payment_intent(payment_intent_id)
                    .await?;

                Ok(PaymentStatus::Cancelled)
            }
            (PaymentStatus::Pending, _) => Ok(PaymentStatus::Cancelled),
            (status, _) => Ok(status),
        }
    }

    async fn notify_cancellation(&self, appointment: &entity::appointment::Model, to: Side) {
        let db = &self.state.db;
        let recipient = match to {
            Side::Educator => EducatorProfileRepository::new(db)
                .get_with_user(appointment.educator_id)
                .await
                .map(|found| found.and_then(|(_, user)| user)),
            Side::Family => FamilyProfileRepository::new(db)
                .get_with_user(appointment.family_id)
                .await
                .map(|found| found.and_then(|(_, user)| user)),
        };

        match recipient {
            Ok(Some(user)) => {
                notification::send_best_effort(
                    &self.state.mailer,
                    notification::appointment_cancelled(
                        &user.email,
                        appointment,
                        &self.state.app_url,
                    ),
                )
                .await;
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(
                appointment_id = %appointment.id,
                "Failed to load cancellation email recipient: {}",
                err
            ),
        }
    }

    async fn get_for_educator(
        &self,
        appointment_id: i32,
        educator_id: i32,
    ) -> Result<entity::appointment::Model, Error> {
        AppointmentRepository::new(&self.state.db)
            .get(appointment_id)
            .await?
            .filter(|appointment| appointment.educator_id == educator_id)
            .ok_or_else(|| Error::NotFound(format!("Appointment {}", appointment_id)))
    }

    async fn get_for_family(
        &self,
        appointment_id: i32,
        family_id: i32,
    ) -> Result<entity::appointment::Model, Error> {
        AppointmentRepository::new(&self.state.db)
            .get(appointment_id)
            .await?
            .filter(|appointment| appointment.family_id == family_id)
            .ok_or_else(|| Error::NotFound(format!("Appointment {}", appointment_id)))
    }
}

/// Start times of the 30 minute increments covering `minutes` from `start`.
fn increments(start: NaiveTime, minutes: i64) -> Vec<NaiveTime> {
    (0..minutes / SLOT_MINUTES)
        .map(|i| start + Duration::minutes(i * SLOT_MINUTES))
        .collect()
}
