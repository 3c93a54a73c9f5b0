use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use entity::sea_orm_active_enums::{ReviewStatus, SubscriptionStatus};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducatorProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub bio: String,
    pub profession_code: String,
    pub hourly_rate_cents: i64,
    pub years_experience: i32,
    pub siret_number: Option<String>,
    pub rpps_number: Option<String>,
    pub sap_number: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducatorProfileDto {
    pub id: i32,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub bio: String,
    pub profession_code: String,
    pub profession_label: String,
    pub hourly_rate_cents: i64,
    pub years_experience: i32,
    pub siret_number: Option<String>,
    pub rpps_number: Option<String>,
    pub sap_number: Option<String>,
    pub video_url: Option<String>,
    #[schema(value_type = String)]
    pub verification_status: ReviewStatus,
    #[schema(value_type = String)]
    pub subscription_status: SubscriptionStatus,
    pub subscription_current_period_end: Option<NaiveDateTime>,
}

/// Public view of an educator in search results
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducatorSummaryDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub profession_code: String,
    pub profession_label: String,
    pub hourly_rate_cents: i64,
    pub years_experience: i32,
    pub avatar_url: Option<String>,
    pub premium: bool,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EducatorSearchResultDto {
    pub results: Vec<EducatorSummaryDto>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FamilyProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub postal_code: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FamilyProfileDto {
    pub id: i32,
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub postal_code: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChildInput {
    pub first_name: String,
    pub birth_date: Option<NaiveDate>,
    pub needs_description: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChildDto {
    pub id: i32,
    pub family_id: i32,
    pub first_name: String,
    pub birth_date: Option<NaiveDate>,
    pub needs_description: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AvailabilityWindowInput {
    /// 0 = Sunday through 6 = Saturday
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AvailabilityWindowDto {
    pub id: i32,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
