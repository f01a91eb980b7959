use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::CompanyConfig;
use crate::db::DbPool;
use crate::documents::{render_invoice_pdf, InvoiceData, InvoiceLine};
use crate::entities::enums::SalesStatus;
use crate::entities::quote::{self, Entity as QuoteEntity};
use crate::entities::quote_product::{self, Entity as QuoteProductEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::contacts::ContactService;
use crate::services::ids;
use crate::storage::{MediaStore, INVOICES};

const TOTALS_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuoteLineInput {
    pub product: String,
    #[serde(default)]
    pub specification: String,
    pub qty: i32,
    pub unit_price: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuoteRequest {
    pub year: i32,
    pub quote_title: String,
    pub company_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub company_email: String,
    #[serde(default)]
    pub vat_applicable: bool,
    #[serde(default)]
    pub vat_percentage: f64,
    pub subtotal: f64,
    pub vat_amount: f64,
    pub grand_total: f64,
    #[serde(default)]
    pub notes_remarks: String,
    pub products: Vec<QuoteLineInput>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuoteRequest {
    pub quote_title: Option<String>,
    pub status: Option<SalesStatus>,
    pub contact_email: Option<String>,
    pub company_email: Option<String>,
    pub vat_applicable: Option<bool>,
    pub vat_percentage: Option<f64>,
    pub subtotal: Option<f64>,
    pub vat_amount: Option<f64>,
    pub grand_total: Option<f64>,
    pub notes_remarks: Option<String>,
    /// When present, replaces the full line set and re-checks the totals.
    pub products: Option<Vec<QuoteLineInput>>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: quote::Model,
    pub products: Vec<quote_product::Model>,
}

/// Cross-field totals check shared by quotes and sales orders.
pub(crate) fn validate_totals(
    lines: &[QuoteLineInput],
    subtotal: f64,
    vat_applicable: bool,
    vat_percentage: f64,
    vat_amount: f64,
    grand_total: f64,
) -> Result<(), ServiceError> {
    if lines.is_empty() {
        return Err(ServiceError::field(
            "products",
            "At least one product is required",
        ));
    }
    for line in lines {
        if line.product.trim().is_empty() {
            return Err(ServiceError::field("product", "Product name cannot be empty"));
        }
        if line.qty <= 0 {
            return Err(ServiceError::field("qty", "Quantity must be greater than 0"));
        }
        if line.unit_price < 0.0 {
            return Err(ServiceError::field(
                "unit_price",
                "Unit price cannot be negative",
            ));
        }
    }

    if subtotal <= 0.0 {
        return Err(ServiceError::field(
            "subtotal",
            "Subtotal must be a positive number",
        ));
    }
    let expected_subtotal: f64 = lines
        .iter()
        .map(|line| f64::from(line.qty) * line.unit_price)
        .sum();
    if (subtotal - expected_subtotal).abs() > TOTALS_TOLERANCE {
        return Err(ServiceError::field(
            "subtotal",
            format!(
                "Subtotal ({subtotal}) does not match the sum of product totals ({expected_subtotal})"
            ),
        ));
    }

    let expected_vat = if vat_applicable {
        subtotal * vat_percentage / 100.0
    } else {
        0.0
    };
    if (vat_amount - expected_vat).abs() > TOTALS_TOLERANCE {
        return Err(ServiceError::field(
            "vat_amount",
            format!("VAT amount ({vat_amount}) does not match expected value ({expected_vat})"),
        ));
    }

    let expected_grand = subtotal + expected_vat;
    if (grand_total - expected_grand).abs() > TOTALS_TOLERANCE {
        return Err(ServiceError::field(
            "grand_total",
            format!(
                "Grand total ({grand_total}) does not match expected value ({expected_grand})"
            ),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct QuoteService {
    db: Arc<DbPool>,
    contacts: ContactService,
    media: MediaStore,
    company: CompanyConfig,
    event_sender: EventSender,
}

impl QuoteService {
    pub fn new(
        db: Arc<DbPool>,
        contacts: ContactService,
        media: MediaStore,
        company: CompanyConfig,
        event_sender: EventSender,
    ) -> Self {
        Self {
            db,
            contacts,
            media,
            company,
            event_sender,
        }
    }

    /// Creates the quote with its lines, then renders and stores the
    /// invoice PDF. A rendering or storage failure is logged and leaves
    /// `invoice_pdf` unset; the quote itself stands.
    #[instrument(skip(self, request), fields(company = %request.company_name))]
    pub async fn create(
        &self,
        created_by: Uuid,
        request: CreateQuoteRequest,
    ) -> Result<QuoteResponse, ServiceError> {
        validate_totals(
            &request.products,
            request.subtotal,
            request.vat_applicable,
            request.vat_percentage,
            request.vat_amount,
            request.grand_total,
        )?;

        let contact = self.contacts.find_by_company(&request.company_name).await?;
        let (contact_name, contact_number) = contact
            .map(|c| (c.contact_name, c.contact_number))
            .unwrap_or_default();

        let quote_no = self.allocate_quote_no().await?;
        let txn = self.db.begin().await?;
        let model = quote::ActiveModel {
            year: Set(request.year),
            quote_title: Set(request.quote_title),
            company_name: Set(request.company_name),
            contact_name: Set(contact_name),
            contact_number: Set(contact_number),
            contact_email: Set(request.contact_email),
            company_email: Set(request.company_email),
            status: Set(SalesStatus::New),
            quote_no: Set(quote_no.clone()),
            vat_applicable: Set(request.vat_applicable),
            vat_percentage: Set(request.vat_percentage),
            subtotal: Set(request.subtotal),
            vat_amount: Set(request.vat_amount),
            grand_total: Set(request.grand_total),
            notes_remarks: Set(request.notes_remarks),
            assign_to: Set(Some(created_by)),
            created_by: Set(Some(created_by)),
            create_date: Set(Utc::now().into()),
            invoice_pdf: Set(None),
            ..Default::default()
        };
        let created = model.insert(&txn).await?;
        for line in &request.products {
            quote_product::ActiveModel {
                quote_id: Set(created.id),
                product: Set(line.product.clone()),
                specification: Set(line.specification.clone()),
                qty: Set(line.qty),
                unit_price: Set(line.unit_price),
                total_price: Set(f64::from(line.qty) * line.unit_price),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        let quote = self.generate_invoice(created).await;
        self.event_sender
            .send(Event::QuoteCreated {
                quote_id: quote.id,
                quote_no,
            })
            .await;
        self.response(quote.id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, year: Option<i32>) -> Result<Vec<QuoteResponse>, ServiceError> {
        let mut query = QuoteEntity::find().order_by_desc(quote::Column::Id);
        if let Some(year) = year {
            query = query.filter(quote::Column::Year.eq(year));
        }
        let quotes = query.all(&*self.db).await?;
        let mut responses = Vec::with_capacity(quotes.len());
        for quote in quotes {
            responses.push(self.response(quote.id).await?);
        }
        Ok(responses)
    }

    pub async fn get(&self, id: i32) -> Result<QuoteResponse, ServiceError> {
        self.find(id).await?;
        self.response(id).await
    }

    pub async fn find_by_quote_no(&self, quote_no: &str) -> Result<Option<quote::Model>, ServiceError> {
        Ok(QuoteEntity::find()
            .filter(quote::Column::QuoteNo.eq(quote_no))
            .one(&*self.db)
            .await?)
    }

    /// Partial update; replacing the lines re-checks the totals against
    /// the effective values. The stored invoice PDF is not regenerated.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i32, update: UpdateQuoteRequest) -> Result<QuoteResponse, ServiceError> {
        let existing = self.find(id).await?;

        let subtotal = update.subtotal.unwrap_or(existing.subtotal);
        let vat_applicable = update.vat_applicable.unwrap_or(existing.vat_applicable);
        let vat_percentage = update.vat_percentage.unwrap_or(existing.vat_percentage);
        let vat_amount = update.vat_amount.unwrap_or(existing.vat_amount);
        let grand_total = update.grand_total.unwrap_or(existing.grand_total);
        if let Some(lines) = &update.products {
            validate_totals(
                lines,
                subtotal,
                vat_applicable,
                vat_percentage,
                vat_amount,
                grand_total,
            )?;
        }

        let txn = self.db.begin().await?;
        let mut active: quote::ActiveModel = existing.into();
        if let Some(quote_title) = update.quote_title {
            active.quote_title = Set(quote_title);
        }
        if let Some(status) = update.status {
            active.status = Set(status);
        }
        if let Some(contact_email) = update.contact_email {
            active.contact_email = Set(contact_email);
        }
        if let Some(company_email) = update.company_email {
            active.company_email = Set(company_email);
        }
        active.vat_applicable = Set(vat_applicable);
        active.vat_percentage = Set(vat_percentage);
        active.subtotal = Set(subtotal);
        active.vat_amount = Set(vat_amount);
        active.grand_total = Set(grand_total);
        if let Some(notes_remarks) = update.notes_remarks {
            active.notes_remarks = Set(notes_remarks);
        }
        let updated = active.update(&txn).await?;

        if let Some(lines) = update.products {
            QuoteProductEntity::delete_many()
                .filter(quote_product::Column::QuoteId.eq(updated.id))
                .exec(&txn)
                .await?;
            for line in &lines {
                quote_product::ActiveModel {
                    quote_id: Set(updated.id),
                    product: Set(line.product.clone()),
                    specification: Set(line.specification.clone()),
                    qty: Set(line.qty),
                    unit_price: Set(line.unit_price),
                    total_price: Set(f64::from(line.qty) * line.unit_price),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }
        txn.commit().await?;
        self.response(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find(id).await?;
        if let Some(pdf) = &existing.invoice_pdf {
            self.media.delete(pdf).await;
        }
        existing.delete(&*self.db).await?;
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<quote::Model, ServiceError> {
        QuoteEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Quote {id} not found")))
    }

    async fn response(&self, id: i32) -> Result<QuoteResponse, ServiceError> {
        let quote = self.find(id).await?;
        let products = QuoteProductEntity::find()
            .filter(quote_product::Column::QuoteId.eq(quote.id))
            .order_by_asc(quote_product::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(QuoteResponse { quote, products })
    }

    async fn allocate_quote_no(&self) -> Result<String, ServiceError> {
        for _ in 0..ids::MAX_GENERATION_ATTEMPTS {
            let quote_no = ids::random_document_no();
            let taken = QuoteEntity::find()
                .filter(quote::Column::QuoteNo.eq(quote_no.clone()))
                .one(&*self.db)
                .await?
                .is_some();
            if !taken {
                return Ok(quote_no);
            }
        }
        Err(ServiceError::Conflict(
            "Unable to generate a unique quote number after multiple attempts".to_string(),
        ))
    }

    /// Renders, stores, and records the invoice PDF. Best effort.
    async fn generate_invoice(&self, quote: quote::Model) -> quote::Model {
        let lines = match QuoteProductEntity::find()
            .filter(quote_product::Column::QuoteId.eq(quote.id))
            .all(&*self.db)
            .await
        {
            Ok(lines) => lines,
            Err(e) => {
                warn!(quote_no = %quote.quote_no, "failed to load quote lines for invoice: {e}");
                return quote;
            }
        };

        let data = invoice_data(&self.company, &quote, &lines);
        let stored = match render_invoice_pdf(&data) {
            Ok(bytes) => {
                let filename = format!("invoice_{}_{}.pdf", quote.quote_no, quote.id);
                self.media.save(INVOICES, &filename, &bytes).await
            }
            Err(e) => Err(e),
        };

        match stored {
            Ok(path) => {
                let mut active: quote::ActiveModel = quote.clone().into();
                active.invoice_pdf = Set(Some(path));
                match active.update(&*self.db).await {
                    Ok(updated) => updated,
                    Err(e) => {
                        warn!(quote_no = %quote.quote_no, "failed to record invoice path: {e}");
                        quote
                    }
                }
            }
            Err(e) => {
                warn!(quote_no = %quote.quote_no, "failed to generate invoice PDF: {e}");
                quote
            }
        }
    }
}

fn invoice_data(
    company: &CompanyConfig,
    quote: &quote::Model,
    lines: &[quote_product::Model],
) -> InvoiceData {
    InvoiceData {
        company_name: company.name.clone(),
        contact_line: company.contact_line.clone(),
        quote_no: quote.quote_no.clone(),
        quote_title: quote.quote_title.clone(),
        date: quote.create_date.format("%B %d, %Y").to_string(),
        year: quote.year,
        status: format!("{:?}", quote.status).to_lowercase(),
        bill_to: vec![
            quote.company_name.clone(),
            format!(
                "Contact: {}",
                if quote.contact_name.is_empty() {
                    "-"
                } else {
                    &quote.contact_name
                }
            ),
            format!("Email: {}", quote.contact_email),
            format!(
                "Phone: {}",
                if quote.contact_number.is_empty() {
                    "-"
                } else {
                    &quote.contact_number
                }
            ),
            format!(
                "Company Email: {}",
                if quote.company_email.is_empty() {
                    "-"
                } else {
                    &quote.company_email
                }
            ),
        ],
        lines: lines
            .iter()
            .map(|line| InvoiceLine {
                product: line.product.clone(),
                specification: line.specification.clone(),
                qty: line.qty,
                unit_price: line.unit_price,
                total_price: line.total_price,
            })
            .collect(),
        subtotal: quote.subtotal,
        vat_applicable: quote.vat_applicable,
        vat_percentage: quote.vat_percentage,
        vat_amount: quote.vat_amount,
        grand_total: quote.grand_total,
        notes: quote.notes_remarks.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i32, unit_price: f64) -> QuoteLineInput {
        QuoteLineInput {
            product: "Widget".into(),
            specification: String::new(),
            qty,
            unit_price,
        }
    }

    #[test]
    fn accepts_consistent_totals() {
        let lines = vec![line(2, 100.0), line(1, 50.0)];
        assert!(validate_totals(&lines, 250.0, true, 5.0, 12.5, 262.5).is_ok());
    }

    #[test]
    fn accepts_within_tolerance() {
        let lines = vec![line(3, 33.33)];
        assert!(validate_totals(&lines, 99.98, false, 0.0, 0.0, 99.98).is_ok());
    }

    #[test]
    fn rejects_empty_lines() {
        assert!(validate_totals(&[], 10.0, false, 0.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn rejects_subtotal_mismatch() {
        let lines = vec![line(2, 100.0)];
        let err = validate_totals(&lines, 150.0, false, 0.0, 0.0, 150.0).unwrap_err();
        assert!(matches!(err, ServiceError::FieldErrors(_)));
    }

    #[test]
    fn rejects_wrong_vat() {
        let lines = vec![line(1, 100.0)];
        assert!(validate_totals(&lines, 100.0, true, 5.0, 7.0, 107.0).is_err());
    }

    #[test]
    fn vat_ignored_when_not_applicable() {
        let lines = vec![line(1, 100.0)];
        // vat_percentage set but not applicable: expected VAT is zero.
        assert!(validate_totals(&lines, 100.0, false, 5.0, 0.0, 100.0).is_ok());
        assert!(validate_totals(&lines, 100.0, false, 5.0, 5.0, 105.0).is_err());
    }

    #[test]
    fn rejects_nonpositive_quantity() {
        let lines = vec![line(0, 10.0)];
        assert!(validate_totals(&lines, 0.0, false, 0.0, 0.0, 0.0).is_err());
    }
}
