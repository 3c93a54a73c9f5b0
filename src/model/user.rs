use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{ReviewStatus, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    #[schema(value_type = String)]
    pub role: UserRole,
    pub avatar_url: Option<String>,
    #[schema(value_type = String)]
    pub avatar_status: ReviewStatus,
    pub created_at: NaiveDateTime,
}

/// Exchange a Supabase access token for a server session
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionLoginDto {
    pub access_token: String,
    /// Required the first time a user signs in; `family` or `educator`
    #[schema(value_type = Option<String>)]
    pub role: Option<UserRole>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PasswordResetDto {
    pub access_token: String,
    pub password: String,
}

/// Everything stored about the current user
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DataExportDto {
    pub user: UserDto,
    pub educator_profile: Option<crate::model::profile::EducatorProfileDto>,
    pub family_profile: Option<crate::model::profile::FamilyProfileDto>,
    pub children: Vec<crate::model::profile::ChildDto>,
    pub availability: Vec<crate::model::profile::AvailabilityWindowDto>,
    pub appointments: Vec<crate::model::booking::AppointmentDto>,
    pub invoices: Vec<crate::model::booking::InvoiceDto>,
    pub certifications: Vec<crate::model::content::CertificationDto>,
    pub blog_posts: Vec<crate::model::content::BlogPostDto>,
    pub community_posts: Vec<crate::model::content::CommunityPostDto>,
    pub messages: Vec<crate::model::messaging::MessageDto>,
    pub exported_at: NaiveDateTime,
}
