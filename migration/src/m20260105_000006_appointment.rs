use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000002_educator_profile::EducatorProfile,
    m20260105_000003_family_profile::FamilyProfile, m20260105_000004_child::Child,
};

static IDX_APPOINTMENT_EDUCATOR_DATE: &str = "idx-appointment-educator_id-date";
static IDX_APPOINTMENT_FAMILY_ID: &str = "idx-appointment-family_id";
static FK_APPOINTMENT_EDUCATOR_ID: &str = "fk-appointment-educator_id";
static FK_APPOINTMENT_FAMILY_ID: &str = "fk-appointment-family_id";
static FK_APPOINTMENT_CHILD_ID: &str = "fk-appointment-child_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointment::Id))
                    .col(integer(Appointment::EducatorId))
                    .col(integer(Appointment::FamilyId))
                    .col(integer_null(Appointment::ChildId))
                    .col(date(Appointment::Date))
                    .col(time(Appointment::StartTime))
                    .col(time(Appointment::EndTime))
                    .col(string(Appointment::Status))
                    .col(string(Appointment::PaymentStatus))
                    .col(big_integer(Appointment::AmountCents))
                    .col(string_null(Appointment::StripeCheckoutSessionId))
                    .col(string_null(Appointment::StripePaymentIntentId))
                    .col(string_len(Appointment::PinCode, 4))
                    .col(timestamp(Appointment::PinExpiresAt))
                    .col(integer(Appointment::PinAttempts))
                    .col(text_null(Appointment::Notes))
                    .col(timestamp(Appointment::CreatedAt))
                    .col(timestamp(Appointment::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_APPOINTMENT_EDUCATOR_ID)
                            .from(Appointment::Table, Appointment::EducatorId)
                            .to(EducatorProfile::Table, EducatorProfile::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_APPOINTMENT_FAMILY_ID)
                            .from(Appointment::Table, Appointment::FamilyId)
                            .to(FamilyProfile::Table, FamilyProfile::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_APPOINTMENT_CHILD_ID)
                            .from(Appointment::Table, Appointment::ChildId)
                            .to(Child::Table, Child::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPOINTMENT_EDUCATOR_DATE)
                    .table(Appointment::Table)
                    .col(Appointment::EducatorId)
                    .col(Appointment::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPOINTMENT_FAMILY_ID)
                    .table(Appointment::Table)
                    .col(Appointment::FamilyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Appointment {
    Table,
    Id,
    EducatorId,
    FamilyId,
    ChildId,
    Date,
    StartTime,
    EndTime,
    Status,
    PaymentStatus,
    AmountCents,
    StripeCheckoutSessionId,
    StripePaymentIntentId,
    PinCode,
    PinExpiresAt,
    PinAttempts,
    Notes,
    CreatedAt,
    UpdatedAt,
}
