use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        messaging::{ConversationDto, MessageDto, MessageInput, StartConversationDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::messaging::MessagingService,
    },
};

pub static MESSAGING_TAG: &str = "messaging";

#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = MESSAGING_TAG,
    responses(
        (status = 200, description = "Conversations of the signed in user", body = Vec<ConversationDto>),
        (status = 403, description = "Families and educators only", body = ErrorDto)
    ),
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let conversations = MessagingService::new(&state.db)
        .list_conversations(&user)
        .await?;

    Ok((StatusCode::OK, Json(conversations)))
}

/// Start, or return the existing, conversation with a counterpart
///
/// `counterpart_profile_id` is an educator profile for families and a family profile for
/// educators; educators may only contact families that booked them.
#[utoipa::path(
    post,
    path = "/api/conversations",
    tag = MESSAGING_TAG,
    request_body = StartConversationDto,
    responses(
        (status = 200, description = "Conversation", body = ConversationDto),
        (status = 403, description = "Families and educators only", body = ErrorDto),
        (status = 404, description = "Counterpart not found", body = ErrorDto)
    ),
)]
pub async fn start_conversation(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<StartConversationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let conversation = MessagingService::new(&state.db)
        .start(&user, payload)
        .await?;

    Ok((StatusCode::OK, Json(conversation)))
}

/// Messages of a conversation, oldest first; marks the counterpart's messages read
#[utoipa::path(
    get,
    path = "/api/conversations/{conversation_id}/messages",
    tag = MESSAGING_TAG,
    params(("conversation_id" = i32, Path, description = "Conversation ID")),
    responses(
        (status = 200, description = "Messages", body = Vec<MessageDto>),
        (status = 404, description = "Conversation not found", body = ErrorDto)
    ),
)]
pub async fn list_messages(
    State(state): State<AppState>,
    session: Session,
    Path(conversation_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let messages = MessagingService::new(&state.db)
        .list_messages(&user, conversation_id)
        .await?;

    Ok((StatusCode::OK, Json(messages)))
}

#[utoipa::path(
    post,
    path = "/api/conversations/{conversation_id}/messages",
    tag = MESSAGING_TAG,
    params(("conversation_id" = i32, Path, description = "Conversation ID")),
    request_body = MessageInput,
    responses(
        (status = 201, description = "Message sent", body = MessageDto),
        (status = 400, description = "Empty or too long message", body = ErrorDto),
        (status = 404, description = "Conversation not found", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Path(conversation_id): Path<i32>,
    Json(payload): Json<MessageInput>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let message = MessagingService::new(&state.db)
        .send(&user, conversation_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
