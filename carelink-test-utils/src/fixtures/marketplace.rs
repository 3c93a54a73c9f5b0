//! Marketplace record fixtures.
//!
//! Parents must exist before children: insert accounts through `test.user()` first.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus, PostStatus, ReviewStatus};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn marketplace<'a>(&'a self) -> MarketplaceFixtures<'a> {
        MarketplaceFixtures { setup: self }
    }
}

pub struct MarketplaceFixtures<'a> {
    setup: &'a TestContext,
}

/// Description of an appointment to insert.
///
/// Defaults to `pending` with a `pending` payment. Any payment status other than `pending`
/// also stores the checkout session `cs_test` and payment intent `pi_test`.
pub struct AppointmentSeed {
    pub educator_id: i32,
    pub family_id: i32,
    pub child_id: Option<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub pin_code: String,
    pub pin_attempts: i32,
    pub pin_expires_at: Option<chrono::NaiveDateTime>,
}

impl AppointmentSeed {
    pub fn new(
        educator_id: i32,
        family_id: i32,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            educator_id,
            family_id,
            child_id: None,
            date,
            start_time,
            end_time,
            status: AppointmentStatus::Pending,
            payment_status: PaymentStatus::Pending,
            pin_code: "4821".to_string(),
            pin_attempts: 0,
            pin_expires_at: None,
        }
    }

    pub fn status(mut self, status: AppointmentStatus, payment_status: PaymentStatus) -> Self {
        self.status = status;
        self.payment_status = payment_status;
        self
    }

    pub fn pin(mut self, pin_code: &str, pin_attempts: i32) -> Self {
        self.pin_code = pin_code.to_string();
        self.pin_attempts = pin_attempts;
        self
    }

    pub fn pin_expires_at(mut self, expires_at: chrono::NaiveDateTime) -> Self {
        self.pin_expires_at = Some(expires_at);
        self
    }

    pub fn child(mut self, child_id: i32) -> Self {
        self.child_id = Some(child_id);
        self
    }
}

impl<'a> MarketplaceFixtures<'a> {
    pub async fn insert_child(&self, family_id: i32) -> Result<entity::child::Model, TestError> {
        Ok(entity::prelude::Child::insert(entity::child::ActiveModel {
            family_id: ActiveValue::Set(family_id),
            first_name: ActiveValue::Set("Leo".to_string()),
            birth_date: ActiveValue::Set(NaiveDate::from_ymd_opt(2018, 4, 12)),
            needs_description: ActiveValue::Set("Autism spectrum, non-verbal".to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a weekly window; `day_of_week` runs from 0 (Sunday) to 6 (Saturday).
    pub async fn insert_availability(
        &self,
        educator_id: i32,
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<entity::availability_window::Model, TestError> {
        Ok(
            entity::prelude::AvailabilityWindow::insert(entity::availability_window::ActiveModel {
                educator_id: ActiveValue::Set(educator_id),
                day_of_week: ActiveValue::Set(day_of_week),
                start_time: ActiveValue::Set(start_time),
                end_time: ActiveValue::Set(end_time),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_appointment(
        &self,
        seed: AppointmentSeed,
    ) -> Result<entity::appointment::Model, TestError> {
        let now = Utc::now().naive_utc();
        let paid = seed.payment_status != PaymentStatus::Pending;
        let pin_expires_at = seed
            .pin_expires_at
            .unwrap_or_else(|| seed.date.and_time(seed.start_time) + Duration::hours(2));

        Ok(
            entity::prelude::Appointment::insert(entity::appointment::ActiveModel {
                educator_id: ActiveValue::Set(seed.educator_id),
                family_id: ActiveValue::Set(seed.family_id),
                child_id: ActiveValue::Set(seed.child_id),
                date: ActiveValue::Set(seed.date),
                start_time: ActiveValue::Set(seed.start_time),
                end_time: ActiveValue::Set(seed.end_time),
                status: ActiveValue::Set(seed.status),
                payment_status: ActiveValue::Set(seed.payment_status),
                amount_cents: ActiveValue::Set(6000),
                stripe_checkout_session_id: ActiveValue::Set(Some("cs_test".to_string())),
                stripe_payment_intent_id: ActiveValue::Set(paid.then(|| "pi_test".to_string())),
                pin_code: ActiveValue::Set(seed.pin_code),
                pin_expires_at: ActiveValue::Set(pin_expires_at),
                pin_attempts: ActiveValue::Set(seed.pin_attempts),
                notes: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_certification(
        &self,
        educator_id: i32,
        diploma_number: Option<&str>,
        status: ReviewStatus,
    ) -> Result<entity::certification::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Certification::insert(entity::certification::ActiveModel {
                educator_id: ActiveValue::Set(educator_id),
                title: ActiveValue::Set("Diplome d'Etat d'educateur specialise".to_string()),
                issuer: ActiveValue::Set("IRTS Rhone-Alpes".to_string()),
                diploma_number: ActiveValue::Set(diploma_number.map(str::to_string)),
                obtained_on: ActiveValue::Set(NaiveDate::from_ymd_opt(2016, 6, 30)),
                document_path: ActiveValue::Set(None),
                status: ActiveValue::Set(status),
                rejection_reason: ActiveValue::Set(None),
                reviewed_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_blog_post(
        &self,
        author_id: i32,
        slug: &str,
        status: PostStatus,
    ) -> Result<entity::blog_post::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::BlogPost::insert(entity::blog_post::ActiveModel {
                author_id: ActiveValue::Set(author_id),
                title: ActiveValue::Set(format!("Post {}", slug)),
                slug: ActiveValue::Set(slug.to_string()),
                content: ActiveValue::Set("Routines that help at bedtime".to_string()),
                cover_image_url: ActiveValue::Set(None),
                status: ActiveValue::Set(status),
                rejection_reason: ActiveValue::Set(None),
                published_at: ActiveValue::Set((status == PostStatus::Published).then_some(now)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_community_post(
        &self,
        author_id: i32,
        status: PostStatus,
    ) -> Result<entity::community_post::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::CommunityPost::insert(entity::community_post::ActiveModel {
                author_id: ActiveValue::Set(author_id),
                title: ActiveValue::Set("Looking for advice".to_string()),
                content: ActiveValue::Set("How do you prepare for a new educator?".to_string()),
                status: ActiveValue::Set(status),
                rejection_reason: ActiveValue::Set(None),
                published_at: ActiveValue::Set((status == PostStatus::Published).then_some(now)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_conversation(
        &self,
        educator_id: i32,
        family_id: i32,
    ) -> Result<entity::conversation::Model, TestError> {
        Ok(
            entity::prelude::Conversation::insert(entity::conversation::ActiveModel {
                educator_id: ActiveValue::Set(educator_id),
                family_id: ActiveValue::Set(family_id),
                last_message_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_message(
        &self,
        conversation_id: i32,
        sender_user_id: i32,
        body: &str,
    ) -> Result<entity::message::Model, TestError> {
        Ok(entity::prelude::Message::insert(entity::message::ActiveModel {
            conversation_id: ActiveValue::Set(conversation_id),
            sender_user_id: ActiveValue::Set(sender_user_id),
            body: ActiveValue::Set(body.to_string()),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert an invoice for a 60 € appointment, with a stored PDF.
    pub async fn insert_invoice(
        &self,
        appointment: &entity::appointment::Model,
    ) -> Result<entity::invoice::Model, TestError> {
        Ok(entity::prelude::Invoice::insert(entity::invoice::ActiveModel {
            appointment_id: ActiveValue::Set(appointment.id),
            educator_id: ActiveValue::Set(appointment.educator_id),
            family_id: ActiveValue::Set(appointment.family_id),
            invoice_number: ActiveValue::Set(Some(format!("CL-2026-{:06}", appointment.id))),
            total_cents: ActiveValue::Set(6000),
            commission_cents: ActiveValue::Set(600),
            processor_fee_cents: ActiveValue::Set(109),
            net_cents: ActiveValue::Set(5291),
            pdf_path: ActiveValue::Set(Some(format!(
                "{}/CL-2026-{:06}.pdf",
                appointment.educator_id, appointment.id
            ))),
            issued_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
