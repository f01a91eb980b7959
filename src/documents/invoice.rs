use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::errors::ServiceError;

const PAGE_WIDTH_MM: f64 = 215.9;
const PAGE_HEIGHT_MM: f64 = 279.4;
const MARGIN_MM: f64 = 14.0;
const LINE_HEIGHT_MM: f64 = 6.0;

/// Everything the renderer needs; decoupled from the quote entity so the
/// renderer stays a pure function over plain data.
#[derive(Debug, Clone)]
pub struct InvoiceData {
    pub company_name: String,
    pub contact_line: String,
    pub quote_no: String,
    pub quote_title: String,
    pub date: String,
    pub year: i32,
    pub status: String,
    pub bill_to: Vec<String>,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub vat_applicable: bool,
    pub vat_percentage: f64,
    pub vat_amount: f64,
    pub grand_total: f64,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub product: String,
    pub specification: String,
    pub qty: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

fn put(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f64,
    x: f64,
    y: f64,
) {
    layer.use_text(text, size as _, Mm(x as _), Mm(y as _), font);
}

/// Renders the invoice as a single-page PDF and returns the raw bytes.
pub fn render_invoice_pdf(invoice: &InvoiceData) -> Result<Vec<u8>, ServiceError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.quote_no),
        Mm(PAGE_WIDTH_MM as _),
        Mm(PAGE_HEIGHT_MM as _),
        "invoice",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ServiceError::InternalError(format!("pdf font: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ServiceError::InternalError(format!("pdf font: {e}")))?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    put(&layer, &bold, &invoice.company_name, 16.0, MARGIN_MM, y);
    y -= 2.0 * LINE_HEIGHT_MM;
    put(&layer, &bold, "Invoice", 14.0, MARGIN_MM, y);
    y -= LINE_HEIGHT_MM;
    put(
        &layer,
        &bold,
        &format!("Quote No: {}", invoice.quote_no),
        11.0,
        MARGIN_MM,
        y,
    );
    y -= LINE_HEIGHT_MM;
    put(
        &layer,
        &font,
        &format!("Date: {}", invoice.date),
        11.0,
        MARGIN_MM,
        y,
    );
    y -= 1.5 * LINE_HEIGHT_MM;

    put(&layer, &bold, "Bill To:", 11.0, MARGIN_MM, y);
    y -= LINE_HEIGHT_MM;
    for line in &invoice.bill_to {
        put(&layer, &font, line, 10.0, MARGIN_MM, y);
        y -= LINE_HEIGHT_MM;
    }
    y -= 0.5 * LINE_HEIGHT_MM;

    put(
        &layer,
        &bold,
        &format!("Quote Title: {}", invoice.quote_title),
        11.0,
        MARGIN_MM,
        y,
    );
    y -= LINE_HEIGHT_MM;
    put(&layer, &font, &format!("Year: {}", invoice.year), 10.0, MARGIN_MM, y);
    y -= LINE_HEIGHT_MM;
    put(
        &layer,
        &font,
        &format!("Status: {}", invoice.status),
        10.0,
        MARGIN_MM,
        y,
    );
    y -= 1.5 * LINE_HEIGHT_MM;

    // Line item table: fixed column offsets.
    let col_spec = 70.0;
    let col_qty = 130.0;
    let col_unit = 150.0;
    let col_total = 180.0;

    put(&layer, &bold, "Product", 10.0, MARGIN_MM, y);
    put(&layer, &bold, "Specification", 10.0, col_spec, y);
    put(&layer, &bold, "Qty", 10.0, col_qty, y);
    put(&layer, &bold, "Unit Price", 10.0, col_unit, y);
    put(&layer, &bold, "Total", 10.0, col_total, y);
    y -= LINE_HEIGHT_MM;

    for line in &invoice.lines {
        put(&layer, &font, &line.product, 9.0, MARGIN_MM, y);
        let spec = if line.specification.is_empty() {
            "-"
        } else {
            &line.specification
        };
        put(&layer, &font, spec, 9.0, col_spec, y);
        put(&layer, &font, &line.qty.to_string(), 9.0, col_qty, y);
        put(
            &layer,
            &font,
            &format!("${:.2}", line.unit_price),
            9.0,
            col_unit,
            y,
        );
        put(
            &layer,
            &font,
            &format!("${:.2}", line.total_price),
            9.0,
            col_total,
            y,
        );
        y -= LINE_HEIGHT_MM;
    }
    y -= LINE_HEIGHT_MM;

    put(
        &layer,
        &font,
        &format!("Subtotal: ${:.2}", invoice.subtotal),
        10.0,
        MARGIN_MM,
        y,
    );
    y -= LINE_HEIGHT_MM;
    let vat_line = if invoice.vat_applicable {
        format!("VAT ({}%): ${:.2}", invoice.vat_percentage, invoice.vat_amount)
    } else {
        "VAT: $0.00".to_string()
    };
    put(&layer, &font, &vat_line, 10.0, MARGIN_MM, y);
    y -= LINE_HEIGHT_MM;
    put(
        &layer,
        &bold,
        &format!("Grand Total: ${:.2}", invoice.grand_total),
        11.0,
        MARGIN_MM,
        y,
    );
    y -= 1.5 * LINE_HEIGHT_MM;

    if !invoice.notes.is_empty() {
        put(&layer, &bold, "Notes/Remarks:", 11.0, MARGIN_MM, y);
        y -= LINE_HEIGHT_MM;
        put(&layer, &font, &invoice.notes, 10.0, MARGIN_MM, y);
    }

    put(&layer, &font, &invoice.contact_line, 9.0, MARGIN_MM, 8.0);

    doc.save_to_bytes()
        .map_err(|e| ServiceError::InternalError(format!("pdf render: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_invoice() -> InvoiceData {
        InvoiceData {
            company_name: "Backoffice Trading LLC".into(),
            contact_line: "Contact: info@backoffice.example".into(),
            quote_no: "10423".into(),
            quote_title: "Warehouse racking".into(),
            date: "March 01, 2026".into(),
            year: 2026,
            status: "new".into(),
            bill_to: vec!["Acme FZE".into(), "Contact: Jo".into()],
            lines: vec![InvoiceLine {
                product: "Pallet rack".into(),
                specification: "2.5m upright".into(),
                qty: 4,
                unit_price: 250.0,
                total_price: 1000.0,
            }],
            subtotal: 1000.0,
            vat_applicable: true,
            vat_percentage: 5.0,
            vat_amount: 50.0,
            grand_total: 1050.0,
            notes: "Delivery within two weeks.".into(),
        }
    }

    #[test]
    fn renders_pdf_bytes() {
        let bytes = render_invoice_pdf(&sample_invoice()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn renders_without_notes_or_lines() {
        let mut invoice = sample_invoice();
        invoice.notes.clear();
        invoice.lines.clear();
        invoice.vat_applicable = false;
        let bytes = render_invoice_pdf(&invoice).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
