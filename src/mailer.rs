//! Outgoing mail transport.
//!
//! Three modes: real SMTP when configured, log-only (default outside
//! production) where sends are logged and reported as delivered, and
//! disabled, where every send fails so callers exercise their failure
//! paths.

use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::SmtpConfig;
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<EmailAttachment>,
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

enum Transport {
    Smtp(Box<AsyncSmtpTransport<Tokio1Executor>>),
    LogOnly,
    Disabled,
}

pub struct Mailer {
    transport: Transport,
    from: Mailbox,
}

impl Mailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, ServiceError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| ServiceError::InternalError(format!("invalid from address: {e}")))?;

        if !config.enabled {
            return Ok(Self {
                transport: Transport::LogOnly,
                from,
            });
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| ServiceError::InternalError(format!("invalid SMTP relay: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport: Transport::Smtp(Box::new(transport)),
            from,
        })
    }

    /// A mailer whose every send fails; used in tests of the
    /// failure-recording path.
    pub fn disabled() -> Self {
        Self {
            transport: Transport::Disabled,
            from: "noreply@backoffice.example".parse().expect("static mailbox"),
        }
    }

    /// A mailer that logs and reports success without any network traffic.
    pub fn log_only() -> Self {
        Self {
            transport: Transport::LogOnly,
            from: "noreply@backoffice.example".parse().expect("static mailbox"),
        }
    }

    /// Sends one message. Errors surface as `ExternalServiceError` for the
    /// caller to record; nothing here retries.
    pub async fn send(&self, email: OutboundEmail) -> Result<(), ServiceError> {
        match &self.transport {
            Transport::Disabled => Err(ServiceError::ExternalServiceError(
                "mail transport is not configured".to_string(),
            )),
            Transport::LogOnly => {
                info!(
                    to = ?email.to,
                    subject = %email.subject,
                    has_attachment = email.attachment.is_some(),
                    "mail transport in log-only mode, skipping delivery"
                );
                Ok(())
            }
            Transport::Smtp(transport) => {
                let message = self.build_message(&email)?;
                transport
                    .send(message)
                    .await
                    .map(|_| ())
                    .map_err(|e| ServiceError::ExternalServiceError(format!("SMTP send failed: {e}")))
            }
        }
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, ServiceError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.clone());
        for recipient in &email.to {
            let mailbox: Mailbox = recipient.parse().map_err(|e| {
                ServiceError::field("email", format!("invalid recipient {recipient}: {e}"))
            })?;
            builder = builder.to(mailbox);
        }

        let html = SinglePart::html(email.html_body.clone());
        let body = match &email.attachment {
            Some(attachment) => {
                let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
                    ServiceError::InternalError(format!("invalid attachment content type: {e}"))
                })?;
                MultiPart::mixed().singlepart(html).singlepart(
                    Attachment::new(attachment.filename.clone())
                        .body(attachment.bytes.clone(), content_type),
                )
            }
            None => MultiPart::mixed().singlepart(html),
        };

        builder
            .multipart(body)
            .map_err(|e| ServiceError::InternalError(format!("failed to build message: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> OutboundEmail {
        OutboundEmail {
            to: vec!["ops@example.com".to_string()],
            subject: "Quotation 10423".to_string(),
            html_body: "<p>Please find attached.</p>".to_string(),
            attachment: None,
        }
    }

    #[tokio::test]
    async fn disabled_transport_fails_every_send() {
        let mailer = Mailer::disabled();
        let err = mailer.send(sample_email()).await.unwrap_err();
        assert!(matches!(err, ServiceError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn log_only_transport_reports_success() {
        let mailer = Mailer::log_only();
        assert!(mailer.send(sample_email()).await.is_ok());
    }

    #[test]
    fn builds_multipart_with_attachment() {
        let mailer = Mailer::log_only();
        let mut email = sample_email();
        email.attachment = Some(EmailAttachment {
            filename: "invoice_10423.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        });
        assert!(mailer.build_message(&email).is_ok());
    }

    #[test]
    fn rejects_invalid_recipient() {
        let mailer = Mailer::log_only();
        let mut email = sample_email();
        email.to = vec!["not-an-address".to_string()];
        assert!(mailer.build_message(&email).is_err());
    }
}
