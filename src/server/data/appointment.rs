use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Fields of an appointment created at checkout
pub struct NewAppointment {
    pub educator_id: i32,
    pub family_id: i32,
    pub child_id: Option<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub amount_cents: i64,
    pub pin_code: String,
    pub pin_expires_at: NaiveDateTime,
    pub notes: Option<String>,
}

/// Statuses which hold a slot on the educator's calendar
pub const SLOT_HOLDING_STATUSES: [AppointmentStatus; 2] =
    [AppointmentStatus::Pending, AppointmentStatus::Accepted];

pub struct AppointmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AppointmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an appointment as `pending` with a `pending` payment
    pub async fn create(
        &self,
        appointment: NewAppointment,
    ) -> Result<entity::appointment::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let appointment = entity::appointment::ActiveModel {
            educator_id: ActiveValue::Set(appointment.educator_id),
            family_id: ActiveValue::Set(appointment.family_id),
            child_id: ActiveValue::Set(appointment.child_id),
            date: ActiveValue::Set(appointment.date),
            start_time: ActiveValue::Set(appointment.start_time),
            end_time: ActiveValue::Set(appointment.end_time),
            status: ActiveValue::Set(AppointmentStatus::Pending),
            payment_status: ActiveValue::Set(PaymentStatus::Pending),
            amount_cents: ActiveValue::Set(appointment.amount_cents),
            stripe_checkout_session_id: ActiveValue::Set(None),
            stripe_payment_intent_id: ActiveValue::Set(None),
            pin_code: ActiveValue::Set(appointment.pin_code),
            pin_expires_at: ActiveValue::Set(appointment.pin_expires_at),
            pin_attempts: ActiveValue::Set(0),
            notes: ActiveValue::Set(appointment.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        appointment.insert(self.db).await
    }

    pub async fn get(
        &self,
        appointment_id: i32,
    ) -> Result<Option<entity::appointment::Model>, DbErr> {
        entity::prelude::Appointment::find_by_id(appointment_id)
            .one(self.db)
            .await
    }

    /// Lists an educator's appointments, most recent date first
    pub async fn list_for_educator(
        &self,
        educator_id: i32,
    ) -> Result<Vec<entity::appointment::Model>, DbErr> {
        entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::EducatorId.eq(educator_id))
            .order_by_desc(entity::appointment::Column::Date)
            .order_by_desc(entity::appointment::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Lists a family's appointments, most recent date first
    pub async fn list_for_family(
        &self,
        family_id: i32,
    ) -> Result<Vec<entity::appointment::Model>, DbErr> {
        entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::FamilyId.eq(family_id))
            .order_by_desc(entity::appointment::Column::Date)
            .order_by_desc(entity::appointment::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Start times of the educator's pending or accepted appointments on `date`
    pub async fn booked_start_times(
        &self,
        educator_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, DbErr> {
        entity::prelude::Appointment::find()
            .select_only()
            .column(entity::appointment::Column::StartTime)
            .filter(entity::appointment::Column::EducatorId.eq(educator_id))
            .filter(entity::appointment::Column::Date.eq(date))
            .filter(entity::appointment::Column::Status.is_in(SLOT_HOLDING_STATUSES))
            .into_tuple::<NaiveTime>()
            .all(self.db)
            .await
    }

    /// Whether a pending or accepted appointment of the educator on `date` intersects
    /// `[start, end)`
    pub async fn overlaps_booking(
        &self,
        educator_id: i32,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool, DbErr> {
        let overlapping = entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::EducatorId.eq(educator_id))
            .filter(entity::appointment::Column::Date.eq(date))
            .filter(entity::appointment::Column::Status.is_in(SLOT_HOLDING_STATUSES))
            .filter(entity::appointment::Column::StartTime.lt(end))
            .filter(entity::appointment::Column::EndTime.gt(start))
            .one(self.db)
            .await?;

        Ok(overlapping.is_some())
    }

    pub async fn set_checkout_session(
        &self,
        appointment: entity::appointment::Model,
        checkout_session_id: String,
    ) -> Result<entity::appointment::Model, DbErr> {
        let mut appointment_am = appointment.into_active_model();
        appointment_am.stripe_checkout_session_id = ActiveValue::Set(Some(checkout_session_id));
        appointment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        appointment_am.update(self.db).await
    }

    /// Records the payment intent of a completed checkout and marks the payment authorized
    pub async fn authorize_payment(
        &self,
        appointment: entity::appointment::Model,
        payment_intent_id: String,
    ) -> Result<entity::appointment::Model, DbErr> {
        let mut appointment_am = appointment.into_active_model();
        appointment_am.stripe_payment_intent_id = ActiveValue::Set(Some(payment_intent_id));
        appointment_am.payment_status = ActiveValue::Set(PaymentStatus::Authorized);
        appointment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        appointment_am.update(self.db).await
    }

    pub async fn set_status(
        &self,
        appointment: entity::appointment::Model,
        status: AppointmentStatus,
        payment_status: PaymentStatus,
    ) -> Result<entity::appointment::Model, DbErr> {
        let mut appointment_am = appointment.into_active_model();
        appointment_am.status = ActiveValue::Set(status);
        appointment_am.payment_status = ActiveValue::Set(payment_status);
        appointment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        appointment_am.update(self.db).await
    }

    pub async fn record_failed_pin_attempt(
        &self,
        appointment: entity::appointment::Model,
    ) -> Result<entity::appointment::Model, DbErr> {
        let attempts = appointment.pin_attempts + 1;

        let mut appointment_am = appointment.into_active_model();
        appointment_am.pin_attempts = ActiveValue::Set(attempts);
        appointment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        appointment_am.update(self.db).await
    }

    /// Appointments holding an authorized payment whose PIN expired before `now`
    pub async fn find_expired_authorized(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::appointment::Model>, DbErr> {
        entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::PaymentStatus.eq(PaymentStatus::Authorized))
            .filter(entity::appointment::Column::Status.is_in(SLOT_HOLDING_STATUSES))
            .filter(entity::appointment::Column::PinExpiresAt.lt(now))
            .order_by_asc(entity::appointment::Column::Id)
            .all(self.db)
            .await
    }
}
