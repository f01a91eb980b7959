mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use uuid::Uuid;

use backoffice_api::config::CompanyConfig;
use backoffice_api::db::DbPool;
use backoffice_api::entities::enums::MailStatus;
use backoffice_api::errors::ServiceError;
use backoffice_api::mailer::Mailer;
use backoffice_api::services::contacts::{ContactService, CreateContactRequest};
use backoffice_api::services::outgoing_mail::{CreateOutgoingMailRequest, OutgoingMailService};
use backoffice_api::services::quotes::{CreateQuoteRequest, QuoteLineInput, QuoteService};
use backoffice_api::storage::MediaStore;

struct Fixture {
    db: Arc<DbPool>,
    media_dir: tempfile::TempDir,
    contacts: ContactService,
    quotes: QuoteService,
    user: Uuid,
}

async fn fixture(name: &str) -> Fixture {
    let db = common::test_db(name).await;
    let media_dir = tempfile::tempdir().unwrap();
    let media = MediaStore::new(media_dir.path());
    let events = common::test_events();
    let contacts = ContactService::new(db.clone(), media.clone());
    let quotes = QuoteService::new(
        db.clone(),
        contacts.clone(),
        media,
        CompanyConfig::default(),
        events,
    );
    Fixture {
        db,
        media_dir,
        contacts,
        quotes,
        user: Uuid::new_v4(),
    }
}

impl Fixture {
    fn mail_service(&self, mailer: Mailer) -> OutgoingMailService {
        OutgoingMailService::new(
            self.db.clone(),
            self.contacts.clone(),
            self.quotes.clone(),
            std::sync::Arc::new(mailer),
            MediaStore::new(self.media_dir.path()),
            common::test_events(),
        )
    }

    async fn seed_contact(&self, company: &str) {
        self.contacts
            .create(
                self.user,
                CreateContactRequest {
                    company_name: company.to_string(),
                    contact_name: "Jo Contact".to_string(),
                    company_email: "office@acme.example".to_string(),
                    contact_email: "jo@acme.example".to_string(),
                    company_number: "+971-4-555-0000".to_string(),
                    contact_number: "+971-50-555-0000".to_string(),
                    license_number: "LIC-1".to_string(),
                    license_expiry_date: Utc::now().date_naive() + Duration::days(365),
                    tirn_number: "TIRN-1".to_string(),
                },
            )
            .await
            .expect("contact");
    }
}

fn quote_request(company: &str) -> CreateQuoteRequest {
    CreateQuoteRequest {
        year: 2026,
        quote_title: "Racking supply".to_string(),
        company_name: company.to_string(),
        contact_email: "jo@acme.example".to_string(),
        company_email: String::new(),
        vat_applicable: true,
        vat_percentage: 5.0,
        subtotal: 1000.0,
        vat_amount: 50.0,
        grand_total: 1050.0,
        notes_remarks: String::new(),
        products: vec![QuoteLineInput {
            product: "Pallet rack".to_string(),
            specification: "2.5m".to_string(),
            qty: 4,
            unit_price: 250.0,
        }],
    }
}

#[tokio::test]
async fn quote_create_denormalizes_contact_and_stores_invoice_pdf() {
    let fx = fixture("sales_quote_pdf").await;
    fx.seed_contact("Acme FZE").await;

    let created = fx
        .quotes
        .create(fx.user, quote_request("Acme FZE"))
        .await
        .unwrap();

    assert_eq!(created.quote.quote_no.len(), 5);
    assert_eq!(created.quote.contact_name, "Jo Contact");
    assert_eq!(created.products.len(), 1);
    assert_eq!(created.products[0].total_price, 1000.0);

    let pdf_path = created.quote.invoice_pdf.expect("invoice pdf recorded");
    let absolute = fx.media_dir.path().join(&pdf_path);
    let bytes = std::fs::read(absolute).expect("stored pdf readable");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn quote_totals_mismatch_is_rejected() {
    let fx = fixture("sales_quote_totals").await;
    let mut request = quote_request("Nobody LLC");
    request.subtotal = 900.0;

    let err = fx.quotes.create(fx.user, request).await.unwrap_err();
    assert_matches!(err, ServiceError::FieldErrors(_));
    assert!(fx.quotes.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn outgoing_mail_attaches_invoice_and_succeeds_with_log_transport() {
    let fx = fixture("sales_mail_ok").await;
    fx.seed_contact("Acme FZE").await;
    let quote = fx
        .quotes
        .create(fx.user, quote_request("Acme FZE"))
        .await
        .unwrap();

    let mail = fx.mail_service(Mailer::log_only());
    let record = mail
        .create_and_send(
            fx.user,
            "sales1",
            CreateOutgoingMailRequest {
                company_name: "Acme FZE".to_string(),
                mail_subject: "Quotation".to_string(),
                message: "Please find our quotation attached.".to_string(),
                quote_no: quote.quote.quote_no.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(record.status, MailStatus::New);
    assert_eq!(record.company_email.as_deref(), Some("office@acme.example"));
}

#[tokio::test]
async fn transport_failure_is_recorded_on_the_mail_record() {
    let fx = fixture("sales_mail_failure").await;
    fx.seed_contact("Acme FZE").await;

    let mail = fx.mail_service(Mailer::disabled());
    let err = mail
        .create_and_send(
            fx.user,
            "sales1",
            CreateOutgoingMailRequest {
                company_name: "Acme FZE".to_string(),
                mail_subject: "Quotation".to_string(),
                message: "Body".to_string(),
                quote_no: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ExternalServiceError(_));

    let records = mail.list(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, MailStatus::Failed);
}

#[tokio::test]
async fn mail_without_known_company_fails_with_field_error() {
    let fx = fixture("sales_mail_no_contact").await;

    let mail = fx.mail_service(Mailer::log_only());
    let err = mail
        .create_and_send(
            fx.user,
            "sales1",
            CreateOutgoingMailRequest {
                company_name: "Unknown LLC".to_string(),
                mail_subject: "Hello".to_string(),
                message: "Body".to_string(),
                quote_no: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::FieldErrors(_));

    let records = mail.list(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, MailStatus::Failed);
}
