use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000006_appointment::Appointment;

static FK_INVOICE_APPOINTMENT_ID: &str = "fk-invoice-appointment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(pk_auto(Invoice::Id))
                    .col(integer_uniq(Invoice::AppointmentId))
                    .col(integer(Invoice::EducatorId))
                    .col(integer(Invoice::FamilyId))
                    .col(string_null(Invoice::InvoiceNumber))
                    .col(big_integer(Invoice::TotalCents))
                    .col(big_integer(Invoice::CommissionCents))
                    .col(big_integer(Invoice::ProcessorFeeCents))
                    .col(big_integer(Invoice::NetCents))
                    .col(string_null(Invoice::PdfPath))
                    .col(timestamp(Invoice::IssuedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_INVOICE_APPOINTMENT_ID)
                            .from(Invoice::Table, Invoice::AppointmentId)
                            .to(Appointment::Table, Appointment::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Invoice {
    Table,
    Id,
    AppointmentId,
    EducatorId,
    FamilyId,
    InvoiceNumber,
    TotalCents,
    CommissionCents,
    ProcessorFeeCents,
    NetCents,
    PdfPath,
    IssuedAt,
}
