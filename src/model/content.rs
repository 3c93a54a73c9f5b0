use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{PostStatus, ReviewStatus};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CertificationInput {
    pub title: String,
    pub issuer: String,
    pub diploma_number: Option<String>,
    pub obtained_on: Option<NaiveDate>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CertificationDto {
    pub id: i32,
    pub educator_id: i32,
    pub title: String,
    pub issuer: String,
    pub diploma_number: Option<String>,
    pub obtained_on: Option<NaiveDate>,
    pub has_document: bool,
    #[schema(value_type = String)]
    pub status: ReviewStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<NaiveDateTime>,
}

/// A diploma number shared by more than one certification
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DuplicateDiplomaDto {
    pub diploma_number: String,
    pub certification_ids: Vec<i32>,
    pub educator_ids: Vec<i32>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub cover_image_url: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPostDto {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    #[schema(value_type = String)]
    pub status: PostStatus,
    pub rejection_reason: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommunityPostDto {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    #[schema(value_type = String)]
    pub status: PostStatus,
    pub rejection_reason: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

/// An avatar awaiting review
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PendingAvatarDto {
    pub user_id: i32,
    pub email: String,
    pub avatar_url: String,
}
