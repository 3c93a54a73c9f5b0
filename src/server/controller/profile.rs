use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, UploadDto},
        profile::{
            AvailabilityWindowDto, AvailabilityWindowInput, ChildDto, ChildInput,
            EducatorProfileDto, EducatorProfileInput, FamilyProfileDto, FamilyProfileInput,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{
            media::{MediaService, Upload},
            profile::ProfileService,
        },
    },
};

pub static PROFILE_TAG: &str = "profile";

/// Get the signed in educator's profile
#[utoipa::path(
    get,
    path = "/api/educator/profile",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Educator profile", body = EducatorProfileDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 404, description = "Profile not created yet", body = ErrorDto)
    ),
)]
pub async fn get_educator_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let profile = ProfileService::new(&state.db)
        .get_educator_profile(&user)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Create the signed in educator's profile; it awaits verification
#[utoipa::path(
    post,
    path = "/api/educator/profile",
    tag = PROFILE_TAG,
    request_body = EducatorProfileInput,
    responses(
        (status = 201, description = "Profile created", body = EducatorProfileDto),
        (status = 400, description = "Invalid profile or profile already exists", body = ErrorDto),
        (status = 403, description = "Educators only", body = ErrorDto)
    ),
)]
pub async fn create_educator_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<EducatorProfileInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let profile = ProfileService::new(&state.db)
        .create_educator_profile(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/api/educator/profile",
    tag = PROFILE_TAG,
    request_body = EducatorProfileInput,
    responses(
        (status = 200, description = "Profile updated", body = EducatorProfileDto),
        (status = 400, description = "Invalid profile", body = ErrorDto),
        (status = 404, description = "Profile not created yet", body = ErrorDto)
    ),
)]
pub async fn update_educator_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<EducatorProfileInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let profile = ProfileService::new(&state.db)
        .update_educator_profile(&user, payload)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Public profile of an approved educator
#[utoipa::path(
    get,
    path = "/api/educators/{educator_id}",
    tag = PROFILE_TAG,
    params(("educator_id" = i32, Path, description = "Educator profile ID")),
    responses(
        (status = 200, description = "Educator profile", body = EducatorProfileDto),
        (status = 404, description = "No approved educator with this ID", body = ErrorDto)
    ),
)]
pub async fn get_public_educator(
    State(state): State<AppState>,
    Path(educator_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let profile = ProfileService::new(&state.db)
        .get_public_educator(educator_id)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Upload the educator's presentation video as the raw request body
#[utoipa::path(
    post,
    path = "/api/educator/video",
    tag = PROFILE_TAG,
    request_body(content = Vec<u8>, description = "video/mp4 or video/webm, at most 100 MiB", content_type = "video/mp4"),
    responses(
        (status = 200, description = "Video stored", body = UploadDto),
        (status = 400, description = "Unsupported type or file too large", body = ErrorDto),
        (status = 403, description = "Educators only", body = ErrorDto),
        (status = 502, description = "Storage upload failed", body = ErrorDto)
    ),
)]
pub async fn upload_video(
    State(state): State<AppState>,
    session: Session,
    upload: Upload,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let video = MediaService::new(&state).upload_video(&user, upload).await?;

    Ok((StatusCode::OK, Json(video)))
}

#[utoipa::path(
    get,
    path = "/api/educator/availability",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Weekly availability windows", body = Vec<AvailabilityWindowDto>),
        (status = 403, description = "Educators only", body = ErrorDto)
    ),
)]
pub async fn list_availability(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let windows = ProfileService::new(&state.db)
        .list_availability(&user)
        .await?;

    Ok((StatusCode::OK, Json(windows)))
}

/// Add a weekly availability window
///
/// Windows on the same day must not overlap.
#[utoipa::path(
    post,
    path = "/api/educator/availability",
    tag = PROFILE_TAG,
    request_body = AvailabilityWindowInput,
    responses(
        (status = 201, description = "Window added", body = AvailabilityWindowDto),
        (status = 400, description = "Invalid or overlapping window", body = ErrorDto),
        (status = 403, description = "Educators only", body = ErrorDto)
    ),
)]
pub async fn add_availability(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AvailabilityWindowInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let window = ProfileService::new(&state.db)
        .add_availability(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(window)))
}

#[utoipa::path(
    delete,
    path = "/api/educator/availability/{window_id}",
    tag = PROFILE_TAG,
    params(("window_id" = i32, Path, description = "Availability window ID")),
    responses(
        (status = 204, description = "Window deleted"),
        (status = 404, description = "Window not found", body = ErrorDto)
    ),
)]
pub async fn delete_availability(
    State(state): State<AppState>,
    session: Session,
    Path(window_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    ProfileService::new(&state.db)
        .delete_availability(&user, window_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/family/profile",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Family profile", body = FamilyProfileDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 404, description = "Profile not created yet", body = ErrorDto)
    ),
)]
pub async fn get_family_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let profile = ProfileService::new(&state.db)
        .get_family_profile(&user)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

#[utoipa::path(
    post,
    path = "/api/family/profile",
    tag = PROFILE_TAG,
    request_body = FamilyProfileInput,
    responses(
        (status = 201, description = "Profile created", body = FamilyProfileDto),
        (status = 400, description = "Invalid profile or profile already exists", body = ErrorDto),
        (status = 403, description = "Families only", body = ErrorDto)
    ),
)]
pub async fn create_family_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<FamilyProfileInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let profile = ProfileService::new(&state.db)
        .create_family_profile(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/api/family/profile",
    tag = PROFILE_TAG,
    request_body = FamilyProfileInput,
    responses(
        (status = 200, description = "Profile updated", body = FamilyProfileDto),
        (status = 400, description = "Invalid profile", body = ErrorDto),
        (status = 404, description = "Profile not created yet", body = ErrorDto)
    ),
)]
pub async fn update_family_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<FamilyProfileInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let profile = ProfileService::new(&state.db)
        .update_family_profile(&user, payload)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/family/children",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Children of the family", body = Vec<ChildDto>),
        (status = 403, description = "Families only", body = ErrorDto)
    ),
)]
pub async fn list_children(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let children = ProfileService::new(&state.db).list_children(&user).await?;

    Ok((StatusCode::OK, Json(children)))
}

#[utoipa::path(
    post,
    path = "/api/family/children",
    tag = PROFILE_TAG,
    request_body = ChildInput,
    responses(
        (status = 201, description = "Child added", body = ChildDto),
        (status = 400, description = "Invalid child", body = ErrorDto),
        (status = 403, description = "Families only", body = ErrorDto)
    ),
)]
pub async fn add_child(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChildInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let child = ProfileService::new(&state.db)
        .add_child(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(child)))
}

#[utoipa::path(
    put,
    path = "/api/family/children/{child_id}",
    tag = PROFILE_TAG,
    params(("child_id" = i32, Path, description = "Child ID")),
    request_body = ChildInput,
    responses(
        (status = 200, description = "Child updated", body = ChildDto),
        (status = 400, description = "Invalid child", body = ErrorDto),
        (status = 404, description = "Child not found", body = ErrorDto)
    ),
)]
pub async fn update_child(
    State(state): State<AppState>,
    session: Session,
    Path(child_id): Path<i32>,
    Json(payload): Json<ChildInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let child = ProfileService::new(&state.db)
        .update_child(&user, child_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(child)))
}

#[utoipa::path(
    delete,
    path = "/api/family/children/{child_id}",
    tag = PROFILE_TAG,
    params(("child_id" = i32, Path, description = "Child ID")),
    responses(
        (status = 204, description = "Child deleted"),
        (status = 404, description = "Child not found", body = ErrorDto)
    ),
)]
pub async fn delete_child(
    State(state): State<AppState>,
    session: Session,
    Path(child_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    ProfileService::new(&state.db)
        .delete_child(&user, child_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
