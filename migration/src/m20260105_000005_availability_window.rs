use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000002_educator_profile::EducatorProfile;

static IDX_AVAILABILITY_WINDOW_EDUCATOR_DAY: &str = "idx-availability_window-educator_id-day_of_week";
static FK_AVAILABILITY_WINDOW_EDUCATOR_ID: &str = "fk-availability_window-educator_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AvailabilityWindow::Table)
                    .if_not_exists()
                    .col(pk_auto(AvailabilityWindow::Id))
                    .col(integer(AvailabilityWindow::EducatorId))
                    .col(small_integer(AvailabilityWindow::DayOfWeek))
                    .col(time(AvailabilityWindow::StartTime))
                    .col(time(AvailabilityWindow::EndTime))
                    .col(timestamp(AvailabilityWindow::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_AVAILABILITY_WINDOW_EDUCATOR_ID)
                            .from(AvailabilityWindow::Table, AvailabilityWindow::EducatorId)
                            .to(EducatorProfile::Table, EducatorProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AVAILABILITY_WINDOW_EDUCATOR_DAY)
                    .table(AvailabilityWindow::Table)
                    .col(AvailabilityWindow::EducatorId)
                    .col(AvailabilityWindow::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvailabilityWindow::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AvailabilityWindow {
    Table,
    Id,
    EducatorId,
    DayOfWeek,
    StartTime,
    EndTime,
    CreatedAt,
}
