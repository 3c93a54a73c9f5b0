//! Conversations between a family and an educator.

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    model::messaging::{ConversationDto, MessageDto, MessageInput, StartConversationDto},
    server::{
        data::{
            appointment::AppointmentRepository, conversation::ConversationRepository,
            educator_profile::EducatorProfileRepository, message::MessageRepository,
        },
        error::Error,
        service::{
            profile::{require_educator, require_family},
            validate::{max_chars, required_text},
        },
    },
};

pub const MAX_MESSAGE_CHARS: usize = 5000;

/// The caller's side of a conversation.
enum Participant {
    Educator(i32),
    Family(i32),
}

impl Participant {
    fn is_in(&self, conversation: &entity::conversation::Model) -> bool {
        match self {
            Self::Educator(id) => conversation.educator_id == *id,
            Self::Family(id) => conversation.family_id == *id,
        }
    }
}

pub fn conversation_dto(conversation: entity::conversation::Model) -> ConversationDto {
    ConversationDto {
        id: conversation.id,
        educator_id: conversation.educator_id,
        family_id: conversation.family_id,
        last_message_at: conversation.last_message_at,
    }
}

pub fn message_dto(message: entity::message::Model) -> MessageDto {
    MessageDto {
        id: message.id,
        conversation_id: message.conversation_id,
        sender_user_id: message.sender_user_id,
        body: message.body,
        read_at: message.read_at,
        created_at: message.created_at,
    }
}

pub struct MessagingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessagingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn participant(&self, user: &entity::app_user::Model) -> Result<Participant, Error> {
        match user.role {
            UserRole::Educator => Ok(Participant::Educator(
                require_educator(self.db, user).await?.id,
            )),
            UserRole::Family => Ok(Participant::Family(require_family(self.db, user).await?.id)),
            UserRole::Admin => Err(Error::Forbidden(
                "Only families and educators have conversations".to_string(),
            )),
        }
    }

    /// Returns the conversation with the counterpart, creating it on first contact.
    ///
    /// Families can contact any approved educator; educators can only contact families that
    /// booked them.
    pub async fn start(
        &self,
        user: &entity::app_user::Model,
        request: StartConversationDto,
    ) -> Result<ConversationDto, Error> {
        let counterpart_id = request.counterpart_profile_id;

        let (educator_id, family_id) = match self.participant(user).await? {
            Participant::Family(family_id) => {
                EducatorProfileRepository::new(self.db)
                    .get_approved_with_user(counterpart_id)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("Educator {}", counterpart_id)))?;

                (counterpart_id, family_id)
            }
            Participant::Educator(educator_id) => {
                let has_booked = AppointmentRepository::new(self.db)
                    .list_for_educator(educator_id)
                    .await?
                    .iter()
                    .any(|appointment| appointment.family_id == counterpart_id);
                if !has_booked {
                    return Err(Error::NotFound(format!("Family {}", counterpart_id)));
                }

                (educator_id, counterpart_id)
            }
        };

        let conversation = ConversationRepository::new(self.db)
            .find_or_create(educator_id, family_id)
            .await?;

        Ok(conversation_dto(conversation))
    }

    pub async fn list_conversations(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<ConversationDto>, Error> {
        let repo = ConversationRepository::new(self.db);

        let conversations = match self.participant(user).await? {
            Participant::Educator(educator_id) => repo.list_for_educator(educator_id).await?,
            Participant::Family(family_id) => repo.list_for_family(family_id).await?,
        };

        Ok(conversations.into_iter().map(conversation_dto).collect())
    }

    /// Messages in sending order; the counterpart's unread messages are marked read.
    pub async fn list_messages(
        &self,
        user: &entity::app_user::Model,
        conversation_id: i32,
    ) -> Result<Vec<MessageDto>, Error> {
        let conversation = self.get_as_participant(user, conversation_id).await?;
        let repo = MessageRepository::new(self.db);

        let marked = repo.mark_read(conversation.id, user.id).await?;
        if marked > 0 {
            tracing::debug!(
                conversation_id = %conversation.id,
                user_id = %user.id,
                marked = %marked,
                "Marked messages read"
            );
        }

        let messages = repo.list_for_conversation(conversation.id).await?;

        Ok(messages.into_iter().map(message_dto).collect())
    }

    pub async fn send(
        &self,
        user: &entity::app_user::Model,
        conversation_id: i32,
        input: MessageInput,
    ) -> Result<MessageDto, Error> {
        let conversation = self.get_as_participant(user, conversation_id).await?;

        let body = required_text("Message", &input.body)?;
        max_chars("Message", &body, MAX_MESSAGE_CHARS)?;

        let message = MessageRepository::new(self.db)
            .create(conversation.id, user.id, body)
            .await?;
        ConversationRepository::new(self.db)
            .touch(conversation, Utc::now().naive_utc())
            .await?;

        Ok(message_dto(message))
    }

    /// Loads a conversation, hiding it from anyone but its two participants.
    async fn get_as_participant(
        &self,
        user: &entity::app_user::Model,
        conversation_id: i32,
    ) -> Result<entity::conversation::Model, Error> {
        let participant = self.participant(user).await?;

        ConversationRepository::new(self.db)
            .get(conversation_id)
            .await?
            .filter(|conversation| participant.is_in(conversation))
            .ok_or_else(|| Error::NotFound(format!("Conversation {}", conversation_id)))
    }
}
