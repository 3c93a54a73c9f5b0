use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_app_user::AppUser;

static FK_FAMILY_PROFILE_USER_ID: &str = "fk-family_profile-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FamilyProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(FamilyProfile::Id))
                    .col(integer_uniq(FamilyProfile::UserId))
                    .col(string(FamilyProfile::FirstName))
                    .col(string(FamilyProfile::LastName))
                    .col(string_null(FamilyProfile::Phone))
                    .col(string_null(FamilyProfile::Address))
                    .col(string(FamilyProfile::City))
                    .col(string(FamilyProfile::PostalCode))
                    .col(string_null(FamilyProfile::StripeCustomerId))
                    .col(timestamp(FamilyProfile::CreatedAt))
                    .col(timestamp(FamilyProfile::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_FAMILY_PROFILE_USER_ID)
                    .from_tbl(FamilyProfile::Table)
                    .from_col(FamilyProfile::UserId)
                    .to_tbl(AppUser::Table)
                    .to_col(AppUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_FAMILY_PROFILE_USER_ID)
                    .table(FamilyProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FamilyProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum FamilyProfile {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Phone,
    Address,
    City,
    PostalCode,
    StripeCustomerId,
    CreatedAt,
    UpdatedAt,
}
