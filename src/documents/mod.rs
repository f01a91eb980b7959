//! Generated documents. Currently just the quote invoice PDF.

mod invoice;

pub use invoice::{render_invoice_pdf, InvoiceData, InvoiceLine};
