use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000002_educator_profile::EducatorProfile;

static IDX_CERTIFICATION_DIPLOMA_NUMBER: &str = "idx-certification-diploma_number";
static FK_CERTIFICATION_EDUCATOR_ID: &str = "fk-certification-educator_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certification::Table)
                    .if_not_exists()
                    .col(pk_auto(Certification::Id))
                    .col(integer(Certification::EducatorId))
                    .col(string(Certification::Title))
                    .col(string(Certification::Issuer))
                    .col(string_null(Certification::DiplomaNumber))
                    .col(date_null(Certification::ObtainedOn))
                    .col(string_null(Certification::DocumentPath))
                    .col(string(Certification::Status))
                    .col(text_null(Certification::RejectionReason))
                    .col(timestamp_null(Certification::ReviewedAt))
                    .col(timestamp(Certification::CreatedAt))
                    .col(timestamp(Certification::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CERTIFICATION_EDUCATOR_ID)
                            .from(Certification::Table, Certification::EducatorId)
                            .to(EducatorProfile::Table, EducatorProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: reused diploma numbers are flagged for review, not rejected
        manager
            .create_index(
                Index::create()
                    .name(IDX_CERTIFICATION_DIPLOMA_NUMBER)
                    .table(Certification::Table)
                    .col(Certification::DiplomaNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certification::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Certification {
    Table,
    Id,
    EducatorId,
    Title,
    Issuer,
    DiplomaNumber,
    ObtainedOn,
    DocumentPath,
    Status,
    RejectionReason,
    ReviewedAt,
    CreatedAt,
    UpdatedAt,
}
