use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000003_family_profile::FamilyProfile;

static FK_CHILD_FAMILY_ID: &str = "fk-child-family_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Child::Table)
                    .if_not_exists()
                    .col(pk_auto(Child::Id))
                    .col(integer(Child::FamilyId))
                    .col(string(Child::FirstName))
                    .col(date_null(Child::BirthDate))
                    .col(text(Child::NeedsDescription))
                    .col(timestamp(Child::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHILD_FAMILY_ID)
                            .from(Child::Table, Child::FamilyId)
                            .to(FamilyProfile::Table, FamilyProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Child::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Child {
    Table,
    Id,
    FamilyId,
    FirstName,
    BirthDate,
    NeedsDescription,
    CreatedAt,
}
