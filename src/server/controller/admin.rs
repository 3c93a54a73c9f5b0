//! Moderation queues, restricted to admins.
//!
//! Every review endpoint takes a [`ModerationDecisionDto`]; rejections must carry a reason.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ModerationDecisionDto},
        content::{
            BlogPostDto, CertificationDto, CommunityPostDto, DuplicateDiplomaDto,
            PendingAvatarDto,
        },
        profile::EducatorProfileDto,
        user::UserDto,
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::moderation::{
            avatar::AvatarService,
            certification::CertificationService,
            post::{BlogService, CommunityService},
            verification::VerificationService,
        },
    },
};

pub static ADMIN_TAG: &str = "admin";

#[utoipa::path(
    get,
    path = "/api/admin/certifications",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Certifications awaiting review", body = Vec<CertificationDto>),
        (status = 403, description = "Admins only", body = ErrorDto)
    ),
)]
pub async fn list_pending_certifications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let certifications = CertificationService::new(&state).list_pending(&user).await?;

    Ok((StatusCode::OK, Json(certifications)))
}

/// Approve or reject a pending certification; the educator is emailed the decision
#[utoipa::path(
    post,
    path = "/api/admin/certifications/{certification_id}/review",
    tag = ADMIN_TAG,
    params(("certification_id" = i32, Path, description = "Certification ID")),
    request_body = ModerationDecisionDto,
    responses(
        (status = 200, description = "Certification reviewed", body = CertificationDto),
        (status = 400, description = "Missing reason or certification not pending", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Certification not found", body = ErrorDto)
    ),
)]
pub async fn review_certification(
    State(state): State<AppState>,
    session: Session,
    Path(certification_id): Path<i32>,
    Json(payload): Json<ModerationDecisionDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let certification = CertificationService::new(&state)
        .review(&user, certification_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(certification)))
}

/// Diploma numbers declared on more than one certification
#[utoipa::path(
    get,
    path = "/api/admin/certifications/duplicates",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Duplicated diploma numbers", body = Vec<DuplicateDiplomaDto>),
        (status = 403, description = "Admins only", body = ErrorDto)
    ),
)]
pub async fn list_duplicate_diplomas(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let duplicates = CertificationService::new(&state)
        .duplicate_diplomas(&user)
        .await?;

    Ok((StatusCode::OK, Json(duplicates)))
}

#[utoipa::path(
    get,
    path = "/api/admin/educators",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Educator profiles awaiting verification", body = Vec<EducatorProfileDto>),
        (status = 403, description = "Admins only", body = ErrorDto)
    ),
)]
pub async fn list_pending_educators(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let educators = VerificationService::new(&state.db)
        .list_pending(&user)
        .await?;

    Ok((StatusCode::OK, Json(educators)))
}

#[utoipa::path(
    post,
    path = "/api/admin/educators/{educator_id}/review",
    tag = ADMIN_TAG,
    params(("educator_id" = i32, Path, description = "Educator profile ID")),
    request_body = ModerationDecisionDto,
    responses(
        (status = 200, description = "Verification status updated", body = EducatorProfileDto),
        (status = 400, description = "Rejection without a reason", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Educator not found", body = ErrorDto)
    ),
)]
pub async fn review_educator(
    State(state): State<AppState>,
    session: Session,
    Path(educator_id): Path<i32>,
    Json(payload): Json<ModerationDecisionDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let educator = VerificationService::new(&state.db)
        .review(&user, educator_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(educator)))
}

#[utoipa::path(
    get,
    path = "/api/admin/avatars",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Avatars awaiting review", body = Vec<PendingAvatarDto>),
        (status = 403, description = "Admins only", body = ErrorDto)
    ),
)]
pub async fn list_pending_avatars(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let avatars = AvatarService::new(&state).list_pending(&user).await?;

    Ok((StatusCode::OK, Json(avatars)))
}

#[utoipa::path(
    post,
    path = "/api/admin/avatars/{user_id}/review",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "ID of the avatar's owner")),
    request_body = ModerationDecisionDto,
    responses(
        (status = 200, description = "Avatar reviewed", body = UserDto),
        (status = 400, description = "Missing reason or avatar not pending", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn review_avatar(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<ModerationDecisionDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let owner = AvatarService::new(&state)
        .review(&user, user_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(owner)))
}

#[utoipa::path(
    get,
    path = "/api/admin/blog",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Blog posts awaiting review", body = Vec<BlogPostDto>),
        (status = 403, description = "Admins only", body = ErrorDto)
    ),
)]
pub async fn list_submitted_blog_posts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let posts = BlogService::new(&state).list_submitted(&user).await?;

    Ok((StatusCode::OK, Json(posts)))
}

/// Publish or reject a submitted blog post
#[utoipa::path(
    post,
    path = "/api/admin/blog/{post_id}/review",
    tag = ADMIN_TAG,
    params(("post_id" = i32, Path, description = "Blog post ID")),
    request_body = ModerationDecisionDto,
    responses(
        (status = 200, description = "Post reviewed", body = BlogPostDto),
        (status = 400, description = "Missing reason or post not submitted", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn review_blog_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Json(payload): Json<ModerationDecisionDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = BlogService::new(&state)
        .review(&user, post_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

#[utoipa::path(
    get,
    path = "/api/admin/community",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Community posts awaiting review", body = Vec<CommunityPostDto>),
        (status = 403, description = "Admins only", body = ErrorDto)
    ),
)]
pub async fn list_submitted_community_posts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let posts = CommunityService::new(&state.db)
        .list_submitted(&user)
        .await?;

    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    post,
    path = "/api/admin/community/{post_id}/review",
    tag = ADMIN_TAG,
    params(("post_id" = i32, Path, description = "Community post ID")),
    request_body = ModerationDecisionDto,
    responses(
        (status = 200, description = "Post reviewed", body = CommunityPostDto),
        (status = 400, description = "Missing reason or post not submitted", body = ErrorDto),
        (status = 403, description = "Admins only", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn review_community_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Json(payload): Json<ModerationDecisionDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let post = CommunityService::new(&state.db)
        .review(&user, post_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}
