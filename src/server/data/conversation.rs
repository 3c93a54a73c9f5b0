use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct ConversationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ConversationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the conversation between an educator and a family, creating it if missing
    pub async fn find_or_create(
        &self,
        educator_id: i32,
        family_id: i32,
    ) -> Result<entity::conversation::Model, DbErr> {
        let existing = entity::prelude::Conversation::find()
            .filter(entity::conversation::Column::EducatorId.eq(educator_id))
            .filter(entity::conversation::Column::FamilyId.eq(family_id))
            .one(self.db)
            .await?;

        if let Some(conversation) = existing {
            return Ok(conversation);
        }

        let conversation = entity::conversation::ActiveModel {
            educator_id: ActiveValue::Set(educator_id),
            family_id: ActiveValue::Set(family_id),
            last_message_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        conversation.insert(self.db).await
    }

    pub async fn get(
        &self,
        conversation_id: i32,
    ) -> Result<Option<entity::conversation::Model>, DbErr> {
        entity::prelude::Conversation::find_by_id(conversation_id)
            .one(self.db)
            .await
    }

    pub async fn list_for_educator(
        &self,
        educator_id: i32,
    ) -> Result<Vec<entity::conversation::Model>, DbErr> {
        entity::prelude::Conversation::find()
            .filter(entity::conversation::Column::EducatorId.eq(educator_id))
            .order_by_desc(entity::conversation::Column::LastMessageAt)
            .order_by_desc(entity::conversation::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_family(
        &self,
        family_id: i32,
    ) -> Result<Vec<entity::conversation::Model>, DbErr> {
        entity::prelude::Conversation::find()
            .filter(entity::conversation::Column::FamilyId.eq(family_id))
            .order_by_desc(entity::conversation::Column::LastMessageAt)
            .order_by_desc(entity::conversation::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn touch(
        &self,
        conversation: entity::conversation::Model,
        last_message_at: NaiveDateTime,
    ) -> Result<entity::conversation::Model, DbErr> {
        let mut conversation_am = conversation.into_active_model();
        conversation_am.last_message_at = ActiveValue::Set(Some(last_message_at));

        conversation_am.update(self.db).await
    }
}

#[cfg(test)]
mod tests {
    mod find_or_create {
        use carelink_test_utils::prelude::*;

        use crate::server::data::conversation::ConversationRepository;

        /// Expect the same conversation to be returned for the same participants
        #[tokio::test]
        async fn reuses_existing_conversation() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let (_, family) = test.user().insert_family("family@carelink.test").await?;

            let repo = ConversationRepository::new(&test.db);
            let first = repo.find_or_create(educator.id, family.id).await?;
            let second = repo.find_or_create(educator.id, family.id).await?;

            assert_eq!(first.id, second.id);

            Ok(())
        }
    }
}
