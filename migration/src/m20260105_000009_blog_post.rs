use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_app_user::AppUser;

static FK_BLOG_POST_AUTHOR_ID: &str = "fk-blog_post-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(pk_auto(BlogPost::Id))
                    .col(integer(BlogPost::AuthorId))
                    .col(string(BlogPost::Title))
                    .col(string_uniq(BlogPost::Slug))
                    .col(text(BlogPost::Content))
                    .col(string_null(BlogPost::CoverImageUrl))
                    .col(string(BlogPost::Status))
                    .col(text_null(BlogPost::RejectionReason))
                    .col(timestamp_null(BlogPost::PublishedAt))
                    .col(timestamp(BlogPost::CreatedAt))
                    .col(timestamp(BlogPost::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_BLOG_POST_AUTHOR_ID)
                            .from(BlogPost::Table, BlogPost::AuthorId)
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
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum BlogPost {
    Table,
    Id,
    AuthorId,
    Title,
    Slug,
    Content,
    CoverImageUrl,
    Status,
    RejectionReason,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
