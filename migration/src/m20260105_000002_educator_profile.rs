use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_app_user::AppUser;

static IDX_EDUCATOR_PROFILE_CITY: &str = "idx-educator_profile-city";
static FK_EDUCATOR_PROFILE_USER_ID: &str = "fk-educator_profile-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EducatorProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(EducatorProfile::Id))
                    .col(integer_uniq(EducatorProfile::UserId))
                    .col(string(EducatorProfile::FirstName))
                    .col(string(EducatorProfile::LastName))
                    .col(string_null(EducatorProfile::Phone))
                    .col(string(EducatorProfile::City))
                    .col(string(EducatorProfile::PostalCode))
                    .col(text(EducatorProfile::Bio))
                    .col(string(EducatorProfile::ProfessionCode))
                    .col(big_integer(EducatorProfile::HourlyRateCents))
                    .col(integer(EducatorProfile::YearsExperience))
                    .col(string_null(EducatorProfile::SiretNumber))
                    .col(string_null(EducatorProfile::RppsNumber))
                    .col(string_null(EducatorProfile::SapNumber))
                    .col(string_null(EducatorProfile::VideoUrl))
                    .col(string(EducatorProfile::VerificationStatus))
                    .col(string_null(EducatorProfile::StripeCustomerId))
                    .col(string(EducatorProfile::SubscriptionStatus))
                    .col(timestamp_null(EducatorProfile::SubscriptionCurrentPeriodEnd))
                    .col(timestamp(EducatorProfile::CreatedAt))
                    .col(timestamp(EducatorProfile::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EDUCATOR_PROFILE_CITY)
                    .table(EducatorProfile::Table)
                    .col(EducatorProfile::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EDUCATOR_PROFILE_USER_ID)
                    .from_tbl(EducatorProfile::Table)
                    .from_col(EducatorProfile::UserId)
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
                    .name(FK_EDUCATOR_PROFILE_USER_ID)
                    .table(EducatorProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EDUCATOR_PROFILE_CITY)
                    .table(EducatorProfile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EducatorProfile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EducatorProfile {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Phone,
    City,
    PostalCode,
    Bio,
    ProfessionCode,
    HourlyRateCents,
    YearsExperience,
    SiretNumber,
    RppsNumber,
    SapNumber,
    VideoUrl,
    VerificationStatus,
    StripeCustomerId,
    SubscriptionStatus,
    SubscriptionCurrentPeriodEnd,
    CreatedAt,
    UpdatedAt,
}
