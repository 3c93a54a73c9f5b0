//! Invoice amounts, numbering and PDF generation for captured appointments.

pub mod pdf;

use chrono::Datelike;
use entity::sea_orm_active_enums::UserRole;

use crate::{
    model::{api::SignedUrlDto, booking::InvoiceDto},
    server::{
        data::{
            child::ChildRepository, educator_profile::EducatorProfileRepository,
            family_profile::FamilyProfileRepository, invoice::InvoiceRepository,
        },
        error::Error,
        model::app::AppState,
        provider::storage::Bucket,
        service::{
            invoice::pdf::InvoiceDocument,
            profile::{require_educator, require_family},
        },
        util::profession::find_profession,
    },
};

/// Lifetime of invoice download links, in seconds.
pub const INVOICE_URL_TTL_SECS: u32 = 300;

/// Split of an appointment's price between the platform, the payment processor and the
/// educator, in integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceAmounts {
    pub total_cents: i64,
    pub commission_cents: i64,
    pub processor_fee_cents: i64,
    pub net_cents: i64,
}

impl InvoiceAmounts {
    /// Commission is 10 % of the total, the processor fee 1.4 % plus 25 cents, both rounded
    /// half up. The educator receives the rest.
    pub fn from_total(total_cents: i64) -> Self {
        let commission_cents = (total_cents * 10 + 50) / 100;
        let processor_fee_cents = (total_cents * 14 + 500) / 1000 + 25;

        Self {
            total_cents,
            commission_cents,
            processor_fee_cents,
            net_cents: total_cents - commission_cents - processor_fee_cents,
        }
    }
}

/// Formats an invoice number such as `CL-2026-000042`.
pub fn invoice_number(year: i32, invoice_id: i32) -> String {
    format!("CL-{}-{:06}", year, invoice_id)
}

pub fn invoice_dto(invoice: entity::invoice::Model) -> InvoiceDto {
    InvoiceDto {
        id: invoice.id,
        appointment_id: invoice.appointment_id,
        invoice_number: invoice.invoice_number,
        total_cents: invoice.total_cents,
        commission_cents: invoice.commission_cents,
        processor_fee_cents: invoice.processor_fee_cents,
        net_cents: invoice.net_cents,
        has_pdf: invoice.pdf_path.is_some(),
        issued_at: invoice.issued_at,
    }
}

pub struct InvoiceService<'a> {
    state: &'a AppState,
}

impl<'a> InvoiceService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Creates the invoice of a captured appointment, renders its PDF and uploads it to the
    /// private invoices bucket.
    ///
    /// Returns the existing invoice when the appointment already has one with a PDF.
    pub async fn generate(
        &self,
        appointment: &entity::appointment::Model,
    ) -> Result<entity::invoice::Model, Error> {
        let db = &self.state.db;
        let invoice_repo = InvoiceRepository::new(db);

        let invoice = match invoice_repo.find_by_appointment(appointment.id).await? {
            Some(invoice) if invoice.pdf_path.is_some() => return Ok(invoice),
            Some(invoice) => invoice,
            None => {
                invoice_repo
                    .create(appointment, InvoiceAmounts::from_total(appointment.amount_cents))
                    .await?
            }
        };

        let number = match &invoice.invoice_number {
            Some(number) => number.clone(),
            None => invoice_number(invoice.issued_at.year(), invoice.id),
        };
        let invoice = if invoice.invoice_number.is_none() {
            invoice_repo.set_number(invoice, number.clone()).await?
        } else {
            invoice
        };

        let educator = EducatorProfileRepository::new(db)
            .get(appointment.educator_id)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Educator {} of appointment {} does not exist",
                    appointment.educator_id, appointment.id
                ))
            })?;
        let family = FamilyProfileRepository::new(db)
            .get(appointment.family_id)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!(
                    "Family {} of appointment {} does not exist",
                    appointment.family_id, appointment.id
                ))
            })?;
        let child = match appointment.child_id {
            Some(child_id) => {
                ChildRepository::new(db)
                    .get_for_family(child_id, family.id)
                    .await?
            }
            None => None,
        };

        let document = InvoiceDocument {
            invoice_number: number.clone(),
            issued_on: invoice.issued_at.format("%d/%m/%Y").to_string(),
            educator_name: format!("{} {}", educator.first_name, educator.last_name),
            profession_description: find_profession(&educator.profession_code)
                .map(|profession| profession.description.to_string())
                .unwrap_or_else(|| educator.profession_code.clone()),
            educator_city: format!("{} {}", educator.postal_code, educator.city),
            siret_number: educator.siret_number,
            rpps_number: educator.rpps_number,
            sap_number: educator.sap_number,
            family_name: format!("{} {}", family.first_name, family.last_name),
            family_address: family
                .address
                .into_iter()
                .chain(std::iter::once(format!(
                    "{} {}",
                    family.postal_code, family.city
                )))
                .collect(),
            service_date: appointment.date.format("%d/%m/%Y").to_string(),
            service_time: format!(
                "{}-{}",
                appointment.start_time.format("%H:%M"),
                appointment.end_time.format("%H:%M")
            ),
            child_name: child.map(|child| child.first_name),
            total_cents: invoice.total_cents,
            commission_cents: invoice.commission_cents,
            processor_fee_cents: invoice.processor_fee_cents,
            net_cents: invoice.net_cents,
        };

        let bytes = pdf::render(&document)?;
        let path = format!("{}/{}.pdf", appointment.educator_id, number);
        self.state
            .storage
            .upload(Bucket::Invoices, &path, "application/pdf", bytes)
            .await?;

        let invoice = invoice_repo.set_pdf_path(invoice, path).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            invoice_id = %invoice.id,
            invoice_number = %number,
            "Generated invoice"
        );

        Ok(invoice)
    }

    /// Invoices of the calling educator or family, newest first.
    pub async fn list_for_user(
        &self,
        user: &entity::app_user::Model,
    ) -> Result<Vec<InvoiceDto>, Error> {
        let db = &self.state.db;
        let repo = InvoiceRepository::new(db);

        let invoices = match user.role {
            UserRole::Educator => {
                let educator = require_educator(db, user).await?;
                repo.list_for_educator(educator.id).await?
            }
            UserRole::Family => {
                let family = require_family(db, user).await?;
                repo.list_for_family(family.id).await?
            }
            UserRole::Admin => {
                return Err(Error::Forbidden(
                    "Only educators and families have invoices".to_string(),
                ))
            }
        };

        Ok(invoices.into_iter().map(invoice_dto).collect())
    }

    /// Short lived download URL of an invoice PDF, for the educator or family it concerns.
    pub async fn pdf_url(
        &self,
        user: &entity::app_user::Model,
        invoice_id: i32,
    ) -> Result<SignedUrlDto, Error> {
        let db = &self.state.db;

        let invoice = InvoiceRepository::new(db)
            .get(invoice_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Invoice {}", invoice_id)))?;

        let is_participant = match user.role {
            UserRole::Educator => require_educator(db, user).await?.id == invoice.educator_id,
            UserRole::Family => require_family(db, user).await?.id == invoice.family_id,
            UserRole::Admin => true,
        };
        if !is_participant {
            // Hide the existence of other users' invoices
            return Err(Error::NotFound(format!("Invoice {}", invoice_id)));
        }

        let path = invoice
            .pdf_path
            .ok_or_else(|| Error::NotFound(format!("PDF of invoice {}", invoice_id)))?;

        let url = self
            .state
            .storage
            .create_signed_url(Bucket::Invoices, &path, INVOICE_URL_TTL_SECS)
            .await?;

        Ok(SignedUrlDto {
            url,
            expires_in: INVOICE_URL_TTL_SECS,
        })
    }
}
