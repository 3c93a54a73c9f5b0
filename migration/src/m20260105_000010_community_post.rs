use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_app_user::AppUser;

static FK_COMMUNITY_POST_AUTHOR_ID: &str = "fk-community_post-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityPost::Table)
                    .if_not_exists()
                    .col(pk_auto(CommunityPost::Id))
                    .col(integer(CommunityPost::AuthorId))
                    .col(string(CommunityPost::Title))
                    .col(text(CommunityPost::Content))
                    .col(string(CommunityPost::Status))
                    .col(text_null(CommunityPost::RejectionReason))
                    .col(timestamp_null(CommunityPost::PublishedAt))
                    .col(timestamp(CommunityPost::CreatedAt))
                    .col(timestamp(CommunityPost::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMUNITY_POST_AUTHOR_ID)
                            .from(CommunityPost::Table, CommunityPost::AuthorId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CommunityPost {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    Status,
    RejectionReason,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
