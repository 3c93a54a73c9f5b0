use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Open a conversation with an educator (as a family) or a family (as an educator)
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StartConversationDto {
    pub counterpart_profile_id: i32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConversationDto {
    pub id: i32,
    pub educator_id: i32,
    pub family_id: i32,
    pub last_message_at: Option<NaiveDateTime>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageInput {
    pub body: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageDto {
    pub id: i32,
    pub conversation_id: i32,
    pub sender_user_id: i32,
    pub body: String,
    pub read_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
