use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000001_app_user::AppUser, m20260105_000002_educator_profile::EducatorProfile,
    m20260105_000003_family_profile::FamilyProfile,
};

static IDX_CONVERSATION_PARTICIPANTS: &str = "idx-conversation-educator_id-family_id";
static IDX_MESSAGE_CONVERSATION_ID: &str = "idx-message-conversation_id";
static FK_CONVERSATION_EDUCATOR_ID: &str = "fk-conversation-educator_id";
static FK_CONVERSATION_FAMILY_ID: &str = "fk-conversation-family_id";
static FK_MESSAGE_CONVERSATION_ID: &str = "fk-message-conversation_id";
static FK_MESSAGE_SENDER_USER_ID: &str = "fk-message-sender_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Conversation::Table)
                    .if_not_exists()
                    .col(pk_auto(Conversation::Id))
                    .col(integer(Conversation::EducatorId))
                    .col(integer(Conversation::FamilyId))
                    .col(timestamp_null(Conversation::LastMessageAt))
                    .col(timestamp(Conversation::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CONVERSATION_EDUCATOR_ID)
                            .from(Conversation::Table, Conversation::EducatorId)
                            .to(EducatorProfile::Table, EducatorProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CONVERSATION_FAMILY_ID)
                            .from(Conversation::Table, Conversation::FamilyId)
                            .to(FamilyProfile::Table, FamilyProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONVERSATION_PARTICIPANTS)
                    .table(Conversation::Table)
                    .col(Conversation::EducatorId)
                    .col(Conversation::FamilyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(pk_auto(Message::Id))
                    .col(integer(Message::ConversationId))
                    .col(integer(Message::SenderUserId))
                    .col(text(Message::Body))
                    .col(timestamp_null(Message::ReadAt))
                    .col(timestamp(Message::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MESSAGE_CONVERSATION_ID)
                            .from(Message::Table, Message::ConversationId)
                            .to(Conversation::Table, Conversation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MESSAGE_SENDER_USER_ID)
                            .from(Message::Table, Message::SenderUserId)
                            .to(AppUser::Table, AppUser::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MESSAGE_CONVERSATION_ID)
                    .table(Message::Table)
                    .col(Message::ConversationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Conversation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Conversation {
    Table,
    Id,
    EducatorId,
    FamilyId,
    LastMessageAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Message {
    Table,
    Id,
    ConversationId,
    SenderUserId,
    Body,
    ReadAt,
    CreatedAt,
}
