use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::service::invoice::InvoiceAmounts;

pub struct InvoiceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvoiceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the invoice of a captured appointment
    ///
    /// The invoice number depends on the generated id, so it is assigned afterwards with
    /// [`Self::set_number`].
    pub async fn create(
        &self,
        appointment: &entity::appointment::Model,
        amounts: InvoiceAmounts,
    ) -> Result<entity::invoice::Model, DbErr> {
        let invoice = entity::invoice::ActiveModel {
            appointment_id: ActiveValue::Set(appointment.id),
            educator_id: ActiveValue::Set(appointment.educator_id),
            family_id: ActiveValue::Set(appointment.family_id),
            invoice_number: ActiveValue::Set(None),
            total_cents: ActiveValue::Set(amounts.total_cents),
            commission_cents: ActiveValue::Set(amounts.commission_cents),
            processor_fee_cents: ActiveValue::Set(amounts.processor_fee_cents),
            net_cents: ActiveValue::Set(amounts.net_cents),
            pdf_path: ActiveValue::Set(None),
            issued_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        invoice.insert(self.db).await
    }

    pub async fn set_number(
        &self,
        invoice: entity::invoice::Model,
        invoice_number: String,
    ) -> Result<entity::invoice::Model, DbErr> {
        let mut invoice_am = invoice.into_active_model();
        invoice_am.invoice_number = ActiveValue::Set(Some(invoice_number));

        invoice_am.update(self.db).await
    }

    pub async fn set_pdf_path(
        &self,
        invoice: entity::invoice::Model,
        pdf_path: String,
    ) -> Result<entity::invoice::Model, DbErr> {
        let mut invoice_am = invoice.into_active_model();
        invoice_am.pdf_path = ActiveValue::Set(Some(pdf_path));

        invoice_am.update(self.db).await
    }

    pub async fn get(&self, invoice_id: i32) -> Result<Option<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find_by_id(invoice_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_appointment(
        &self,
        appointment_id: i32,
    ) -> Result<Option<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::AppointmentId.eq(appointment_id))
            .one(self.db)
            .await
    }

    pub async fn list_for_educator(
        &self,
        educator_id: i32,
    ) -> Result<Vec<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::EducatorId.eq(educator_id))
            .order_by_desc(entity::invoice::Column::IssuedAt)
            .order_by_desc(entity::invoice::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn list_for_family(
        &self,
        family_id: i32,
    ) -> Result<Vec<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::FamilyId.eq(family_id))
            .order_by_desc(entity::invoice::Column::IssuedAt)
            .order_by_desc(entity::invoice::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use carelink_test_utils::prelude::*;
        use chrono::{NaiveDate, NaiveTime};
        use entity::sea_orm_active_enums::{AppointmentStatus, PaymentStatus};

        use crate::server::{
            data::invoice::InvoiceRepository, service::invoice::InvoiceAmounts,
        };

        /// Expect a second invoice for the same appointment to violate the unique constraint
        #[tokio::test]
        async fn one_invoice_per_appointment() -> Result<(), TestError> {
            let test = test_setup_with_marketplace_tables!()?;
            let (_, educator) = test.user().insert_educator("edu@carelink.test").await?;
            let (_, family) = test.user().insert_family("family@carelink.test").await?;
            let appointment = test
                .marketplace()
                .insert_appointment(
                    AppointmentSeed::new(
                        educator.id,
                        family.id,
                        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                    )
                    .status(AppointmentStatus::Completed, PaymentStatus::Captured),
                )
                .await?;

            let repo = InvoiceRepository::new(&test.db);
            let amounts = InvoiceAmounts::from_total(6000);
            let invoice = repo.create(&appointment, amounts).await?;
            let duplicate = repo.create(&appointment, amounts).await;

            assert_eq!(invoice.net_cents, 5291);
            assert_eq!(invoice.invoice_number, None);
            assert!(duplicate.is_err());

            Ok(())
        }
    }
}
