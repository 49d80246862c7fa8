use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use super::{EmailProvider, OutboundEmail, ProviderError};
use crate::config::SmtpConfig;

pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        Ok(Self {
            transport: build_smtp_transport(config)?,
        })
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, ProviderError> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|e| ProviderError::from(format!("Invalid from address: {e}")))?;
        // Not the submitter's parse error text: it may mention "domain".
        let reply_to: Mailbox = email
            .reply_to
            .parse()
            .map_err(|_| ProviderError::from("Invalid reply-to address"))?;

        let message_id = format!("{}@{}", Uuid::now_v7(), from.email.domain());

        let mut builder = Message::builder()
            .from(from)
            .reply_to(reply_to)
            .subject(email.subject.clone())
            .message_id(Some(format!("<{message_id}>")));

        for to in &email.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|e| ProviderError::from(format!("Invalid to address: {e}")))?;
            builder = builder.to(mailbox);
        }

        let message = builder
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| ProviderError::from(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ProviderError::from(format!("Failed to send email: {e}")))?;

        Ok(Some(message_id))
    }
}

pub fn build_smtp_transport(
    config: &SmtpConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, String> {
    let creds = Credentials::new(config.user.clone(), config.pass.clone());

    let transport = match config.tls_mode.as_str() {
        "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| format!("SMTP relay error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build(),
        "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .credentials(creds)
            .build(),
        _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP starttls error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build(),
    };

    Ok(transport)
}
