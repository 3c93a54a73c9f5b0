//! Factory functions for in-memory models.
//!
//! These build models with standard test values and never touch the database, for unit tests
//! of pure logic such as slot computation or invoice rendering.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::{
    AppointmentStatus, PaymentStatus, ReviewStatus, SubscriptionStatus,
};

/// Approved educator charging 60 € per hour.
pub fn educator_profile(id: i32) -> entity::educator_profile::Model {
    let now = Utc::now().naive_utc();

    entity::educator_profile::Model {
        id,
        user_id: id,
        first_name: "Alex".to_string(),
        last_name: "Martin".to_string(),
        phone: Some("0600000000".to_string()),
        city: "Lyon".to_string(),
        postal_code: "69003".to_string(),
        bio: "Specialised educator with autism spectrum experience".to_string(),
        profession_code: "educateur_specialise".to_string(),
        hourly_rate_cents: 6000,
        years_experience: 8,
        siret_number: Some("12345678900012".to_string()),
        rpps_number: None,
        sap_number: None,
        video_url: None,
        verification_status: ReviewStatus::Approved,
        stripe_customer_id: None,
        subscription_status: SubscriptionStatus::Inactive,
        subscription_current_period_end: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn family_profile(id: i32) -> entity::family_profile::Model {
    let now = Utc::now().naive_utc();

    entity::family_profile::Model {
        id,
        user_id: id,
        first_name: "Camille".to_string(),
        last_name: "Durand".to_string(),
        phone: None,
        address: Some("12 rue de la Paix".to_string()),
        city: "Lyon".to_string(),
        postal_code: "69002".to_string(),
        stripe_customer_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn child(id: i32, family_id: i32) -> entity::child::Model {
    entity::child::Model {
        id,
        family_id,
        first_name: "Leo".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2018, 4, 12),
        needs_description: "Autism spectrum, non-verbal".to_string(),
        created_at: Utc::now().naive_utc(),
    }
}

/// Weekly window on `day_of_week` (0 = Sunday).
pub fn availability_window(
    id: i32,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> entity::availability_window::Model {
    entity::availability_window::Model {
        id,
        educator_id: 1,
        day_of_week,
        start_time,
        end_time,
        created_at: Utc::now().naive_utc(),
    }
}

/// Appointment with PIN `4821` expiring two hours after its start.
pub fn appointment(
    id: i32,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    status: AppointmentStatus,
) -> entity::appointment::Model {
    let now = Utc::now().naive_utc();

    entity::appointment::Model {
        id,
        educator_id: 1,
        family_id: 1,
        child_id: None,
        date,
        start_time,
        end_time,
        status,
        payment_status: PaymentStatus::Authorized,
        amount_cents: 6000,
        stripe_checkout_session_id: Some("cs_test".to_string()),
        stripe_payment_intent_id: Some("pi_test".to_string()),
        pin_code: "4821".to_string(),
        pin_expires_at: date.and_time(start_time) + Duration::hours(2),
        pin_attempts: 0,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}
