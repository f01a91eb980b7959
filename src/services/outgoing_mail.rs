use std::sync::Arc;

use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::enums::MailStatus;
use crate::entities::outgoing_mail::{self, Entity as OutgoingMailEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::mailer::{EmailAttachment, Mailer, OutboundEmail};
use crate::services::contacts::ContactService;
use crate::services::quotes::QuoteService;
use crate::storage::MediaStore;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOutgoingMailRequest {
    pub company_name: String,
    pub mail_subject: String,
    pub message: String,
    #[serde(default)]
    pub quote_no: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOutgoingMailRequest {
    pub status: Option<MailStatus>,
}

pub struct OutgoingMailService {
    db: Arc<DbPool>,
    contacts: ContactService,
    quotes: QuoteService,
    mailer: Arc<Mailer>,
    media: MediaStore,
    event_sender: EventSender,
}

impl OutgoingMailService {
    pub fn new(
        db: Arc<DbPool>,
        contacts: ContactService,
        quotes: QuoteService,
        mailer: Arc<Mailer>,
        media: MediaStore,
        event_sender: EventSender,
    ) -> Self {
        Self {
            db,
            contacts,
            quotes,
            mailer,
            media,
            event_sender,
        }
    }

    /// Records the mail, then dispatches it. Delivery failures are written
    /// to the record's status before the error is reported; nothing is
    /// retried.
    #[instrument(skip(self, request), fields(company = %request.company_name, subject = %request.mail_subject))]
    pub async fn create_and_send(
        &self,
        created_by: Uuid,
        sender_username: &str,
        request: CreateOutgoingMailRequest,
    ) -> Result<outgoing_mail::Model, ServiceError> {
        if request.company_name.trim().is_empty() {
            return Err(ServiceError::field("company_name", "This field is required"));
        }
        if request.mail_subject.trim().is_empty() {
            return Err(ServiceError::field("mail_subject", "This field is required"));
        }
        if request.message.trim().is_empty() {
            return Err(ServiceError::field("message", "This field is required"));
        }

        let contact = self.contacts.find_by_company(&request.company_name).await?;
        let (contact_name, contact_number, company_email, contact_email) = contact
            .map(|c| {
                (
                    Some(c.contact_name),
                    Some(c.contact_number),
                    Some(c.company_email),
                    Some(c.contact_email),
                )
            })
            .unwrap_or((None, None, None, None));

        let now = Utc::now();
        let model = outgoing_mail::ActiveModel {
            company_name: Set(request.company_name.clone()),
            contact_name: Set(contact_name.clone()),
            contact_number: Set(contact_number),
            status: Set(MailStatus::New),
            message: Set(request.message.clone()),
            created_on: Set(now.into()),
            year: Set(now.year()),
            created_by: Set(created_by),
            company_email: Set(company_email.clone()),
            contact_email: Set(contact_email.clone()),
            mail_subject: Set(request.mail_subject.clone()),
            quote_no: Set(request.quote_no.clone()),
            ..Default::default()
        };
        let record = model.insert(&*self.db).await?;

        let recipients: Vec<String> = [company_email, contact_email]
            .into_iter()
            .flatten()
            .filter(|address| !address.trim().is_empty())
            .collect();
        if recipients.is_empty() {
            let record = self.mark_failed(record).await?;
            self.event_sender
                .send(Event::MailFailed {
                    outgoing_mail_id: record.id,
                    error: "no valid addresses".to_string(),
                })
                .await;
            return Err(ServiceError::field(
                "email",
                "No valid email addresses found for this company",
            ));
        }

        let attachment = self.invoice_attachment(&request.quote_no).await;
        let email = OutboundEmail {
            to: recipients,
            subject: request.mail_subject.clone(),
            html_body: render_body(
                &request.company_name,
                contact_name.as_deref().unwrap_or("Recipient"),
                &request.message,
                &request.quote_no,
                sender_username,
            ),
            attachment,
        };

        match self.mailer.send(email).await {
            Ok(()) => {
                info!(outgoing_mail_id = record.id, "outgoing mail dispatched");
                self.event_sender
                    .send(Event::MailDispatched {
                        outgoing_mail_id: record.id,
                    })
                    .await;
                Ok(record)
            }
            Err(e) => {
                let record = self.mark_failed(record).await?;
                self.event_sender
                    .send(Event::MailFailed {
                        outgoing_mail_id: record.id,
                        error: e.to_string(),
                    })
                    .await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, year: Option<i32>) -> Result<Vec<outgoing_mail::Model>, ServiceError> {
        let mut query = OutgoingMailEntity::find().order_by_desc(outgoing_mail::Column::Id);
        if let Some(year) = year {
            query = query.filter(outgoing_mail::Column::Year.eq(year));
        }
        Ok(query.all(&*self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<outgoing_mail::Model, ServiceError> {
        OutgoingMailEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outgoing mail {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i32,
        request: UpdateOutgoingMailRequest,
    ) -> Result<outgoing_mail::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut active: outgoing_mail::ActiveModel = existing.into();
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    async fn mark_failed(
        &self,
        record: outgoing_mail::Model,
    ) -> Result<outgoing_mail::Model, ServiceError> {
        let mut active: outgoing_mail::ActiveModel = record.into();
        active.status = Set(MailStatus::Failed);
        Ok(active.update(&*self.db).await?)
    }

    /// Loads the stored invoice PDF for the referenced quote, if any.
    async fn invoice_attachment(&self, quote_no: &str) -> Option<EmailAttachment> {
        if quote_no.is_empty() {
            return None;
        }
        let quote = match self.quotes.find_by_quote_no(quote_no).await {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                warn!(quote_no, "quote not found for mail attachment");
                return None;
            }
            Err(e) => {
                warn!(quote_no, "failed to look up quote for attachment: {e}");
                return None;
            }
        };
        let path = quote.invoice_pdf?;
        match self.media.read(&path).await {
            Ok(bytes) => Some(EmailAttachment {
                filename: format!("invoice_{quote_no}.pdf"),
                content_type: "application/pdf".to_string(),
                bytes,
            }),
            Err(e) => {
                warn!(quote_no, "failed to read stored invoice: {e}");
                None
            }
        }
    }
}

fn render_body(
    company_name: &str,
    contact_name: &str,
    message: &str,
    quote_no: &str,
    sender: &str,
) -> String {
    let quote_line = if quote_no.is_empty() {
        String::new()
    } else {
        format!("<p>Reference: Quote No. {quote_no}</p>")
    };
    format!(
        "<html><body>\
         <p>Dear {contact_name},</p>\
         <p>{message}</p>\
         {quote_line}\
         <p>Regards,<br/>{sender}</p>\
         <p><small>This message was sent to {company_name}.</small></p>\
         </body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_includes_quote_reference_when_present() {
        let body = render_body("Acme", "Jo", "Hello", "10423", "sales1");
        assert!(body.contains("Quote No. 10423"));
        assert!(body.contains("Dear Jo,"));
    }

    #[test]
    fn body_omits_quote_reference_when_absent() {
        let body = render_body("Acme", "Recipient", "Hello", "", "sales1");
        assert!(!body.contains("Reference:"));
    }
}
