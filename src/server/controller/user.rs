use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{DataExportDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::{export::ExportService, media::Upload, moderation::avatar::AvatarService},
    },
};

pub static USER_TAG: &str = "user";

/// Everything Carelink stores about the signed in user, as one JSON document
#[utoipa::path(
    get,
    path = "/api/user/export",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Personal data export", body = DataExportDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_data(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let export = ExportService::new(&state.db).export(&user).await?;

    Ok((StatusCode::OK, Json(export)))
}

/// Upload a new avatar as the raw request body; it is hidden until an admin approves it
#[utoipa::path(
    post,
    path = "/api/user/avatar",
    tag = USER_TAG,
    request_body(content = Vec<u8>, description = "image/jpeg, image/png or image/webp, at most 5 MiB", content_type = "image/png"),
    responses(
        (status = 200, description = "Avatar pending review", body = UserDto),
        (status = 400, description = "Unsupported type or file too large", body = ErrorDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 502, description = "Storage upload failed", body = ErrorDto)
    ),
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    session: Session,
    upload: Upload,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let user = AvatarService::new(&state).upload(&user, upload).await?;

    Ok((StatusCode::OK, Json(user)))
}
