//! A4 invoice rendering.
//!
//! The layout is a fixed coordinate script: every block is written at a known position with
//! the built in Helvetica fonts, measured in millimetres from the bottom left corner.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::server::error::Error;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 20.0;
const RIGHT_COLUMN: f32 = 115.0;
const AMOUNT_COLUMN: f32 = 160.0;
const LINE: f32 = 5.5;

/// Everything printed on an invoice, already formatted.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub issued_on: String,
    pub educator_name: String,
    pub profession_description: String,
    pub educator_city: String,
    pub siret_number: Option<String>,
    pub rpps_number: Option<String>,
    pub sap_number: Option<String>,
    pub family_name: String,
    pub family_address: Vec<String>,
    pub service_date: String,
    pub service_time: String,
    pub child_name: Option<String>,
    pub total_cents: i64,
    pub commission_cents: i64,
    pub processor_fee_cents: i64,
    pub net_cents: i64,
}

pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02} EUR", cents / 100, cents % 100)
}

struct Writer {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Writer {
    fn text(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.regular);
    }

    fn bold(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.bold);
    }
}

/// Renders the invoice and returns the PDF bytes.
pub fn render(invoice: &InvoiceDocument) -> Result<Vec<u8>, Error> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Invoice",
    );

    let writer = Writer {
        layer: doc.get_page(page).get_layer(layer),
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    // Header
    writer.bold("CARELINK", 20.0, LEFT, 275.0);
    writer.text("Invoice issued on behalf of the educator", 9.0, LEFT, 269.0);
    writer.bold(
        &format!("Invoice {}", invoice.invoice_number),
        13.0,
        RIGHT_COLUMN,
        275.0,
    );
    writer.text(
        &format!("Date: {}", invoice.issued_on),
        10.0,
        RIGHT_COLUMN,
        269.0,
    );

    // Educator
    let mut y = 250.0;
    writer.bold("Service provider", 11.0, LEFT, y);
    y -= LINE + 1.0;
    writer.text(&invoice.educator_name, 10.0, LEFT, y);
    y -= LINE;
    writer.text(&invoice.profession_description, 10.0, LEFT, y);
    y -= LINE;
    writer.text(&invoice.educator_city, 10.0, LEFT, y);
    for (label, value) in [
        ("SIRET", &invoice.siret_number),
        ("RPPS", &invoice.rpps_number),
        ("SAP", &invoice.sap_number),
    ] {
        if let Some(value) = value {
            y -= LINE;
            writer.text(&format!("{}: {}", label, value), 10.0, LEFT, y);
        }
    }

    // Family
    let mut y = 250.0;
    writer.bold("Client", 11.0, RIGHT_COLUMN, y);
    y -= LINE + 1.0;
    writer.text(&invoice.family_name, 10.0, RIGHT_COLUMN, y);
    for line in &invoice.family_address {
        y -= LINE;
        writer.text(line, 10.0, RIGHT_COLUMN, y);
    }

    // Service line
    let mut y = 200.0;
    writer.bold("Service", 11.0, LEFT, y);
    y -= LINE + 1.0;
    writer.text(
        &format!(
            "{} on {}, {}",
            invoice.profession_description, invoice.service_date, invoice.service_time
        ),
        10.0,
        LEFT,
        y,
    );
    if let Some(child_name) = &invoice.child_name {
        y -= LINE;
        writer.text(&format!("For: {}", child_name), 10.0, LEFT, y);
    }

    // Amounts
    let mut y = 170.0;
    writer.bold("Amount", 11.0, LEFT, y);
    writer.bold("EUR", 11.0, AMOUNT_COLUMN, y);
    for (label, cents) in [
        ("Total paid by the client", invoice.total_cents),
        ("Platform commission (10%)", -invoice.commission_cents),
        ("Payment processing fee (1.4% + 0.25)", -invoice.processor_fee_cents),
    ] {
        y -= LINE + 1.0;
        writer.text(label, 10.0, LEFT, y);
        let amount = if cents < 0 {
            format!("-{}", format_cents(-cents))
        } else {
            format_cents(cents)
        };
        writer.text(&amount, 10.0, AMOUNT_COLUMN, y);
    }
    y -= LINE + 2.0;
    writer.bold("Net paid to the educator", 10.0, LEFT, y);
    writer.bold(&format_cents(invoice.net_cents), 10.0, AMOUNT_COLUMN, y);

    if invoice.sap_number.is_some() {
        y -= LINE * 3.0;
        writer.text(
            "Service a la personne: this invoice entitles the client to the tax credit",
            9.0,
            LEFT,
            y,
        );
        y -= LINE - 1.0;
        writer.text(
            "provided by article 199 sexdecies of the French tax code.",
            9.0,
            LEFT,
            y,
        );
    }

    // Footer
    writer.text(
        "VAT not applicable, article 293 B of the French tax code.",
        8.0,
        LEFT,
        20.0,
    );
    writer.text(
        "Payment received through Carelink. Thank you for your trust.",
        8.0,
        LEFT,
        15.0,
    );

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(sap_number: Option<&str>) -> InvoiceDocument {
        InvoiceDocument {
            invoice_number: "CL-2026-000042".to_string(),
            issued_on: "02/03/2026".to_string(),
            educator_name: "Alex Martin".to_string(),
            profession_description: "Accompagnement educatif specialise (DEES)".to_string(),
            educator_city: "69003 Lyon".to_string(),
            siret_number: Some("12345678900012".to_string()),
            rpps_number: None,
            sap_number: sap_number.map(str::to_string),
            family_name: "Nora Petit".to_string(),
            family_address: vec!["44000 Nantes".to_string()],
            service_date: "02/03/2026".to_string(),
            service_time: "09:00-10:00".to_string(),
            child_name: Some("Leo".to_string()),
            total_cents: 6000,
            commission_cents: 600,
            processor_fee_cents: 109,
            net_cents: 5291,
        }
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_cents(5291), "52.91 EUR");
        assert_eq!(format_cents(5), "0.05 EUR");
    }

    #[test]
    fn renders_pdf() {
        let bytes = render(&document(None)).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_with_tax_credit_mention() {
        let bytes = render(&document(Some("SAP123456789"))).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }
}
