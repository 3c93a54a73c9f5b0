use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

pub struct MessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        conversation_id: i32,
        sender_user_id: i32,
        body: String,
    ) -> Result<entity::message::Model, DbErr> {
        let message = entity::message::ActiveModel {
            conversation_id: ActiveValue::Set(conversation_id),
            sender_user_id: ActiveValue::Set(sender_user_id),
            body: ActiveValue::Set(body),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        message.insert(self.db).await
    }

    /// Lists a conversation's messages in the order they were sent
    pub async fn list_for_conversation(
        &self,
        conversation_id: i32,
    ) -> Result<Vec<entity::message::Model>, DbErr> {
        entity::prelude::Message::find()
            .filter(entity::message::Column::ConversationId.eq(conversation_id))
            .order_by_asc(entity::message::Column::CreatedAt)
            .order_by_asc(entity::message::Column::Id)
            .all(self.db)
            .await
    }

    /// Marks every unread message not sent by `reader_user_id` as read
    ///
    /// Returns the number of messages updated.
    pub async fn mark_read(
        &self,
        conversation_id: i32,
        reader_user_id: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Message::update_many()
            .col_expr(
                entity::message::Column::ReadAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::message::Column::ConversationId.eq(conversation_id))
            .filter(entity::message::Column::SenderUserId.ne(reader_user_id))
            .filter(entity::message::Column::ReadAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn list_sent_by(
        &self,
        sender_user_id: i32,
    ) -> Result<Vec<entity::message::Model>, DbErr> {
        entity::prelude::Message::find()
            .filter(entity::message::Column::SenderUserId.eq(sender_user_id))
            .order_by_asc(entity::message::Column::CreatedAt)
            .order_by_asc(entity::message::Column::Id)
            .all(self.db)
            .await
    }
}
