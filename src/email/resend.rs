use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{EmailProvider, OutboundEmail, ProviderError};

/// Resend's HTTP API (`POST /emails`).
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailReply {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorReply {
    message: Option<String>,
}

impl ResendProvider {
    pub fn new(api_key: String, api_url: String) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| format!("Failed to build Resend client: {e}"))?;

        Ok(Self {
            client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    fn name(&self) -> &str {
        "resend"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, ProviderError> {
        let body = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let resp = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from(format!("Email provider request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            // Resend puts the human-readable reason in `message`.
            let message = serde_json::from_str::<ErrorReply>(&text)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| {
                    format!(
                        "Email provider returned {}: {}",
                        status.as_u16(),
                        text.chars().take(512).collect::<String>()
                    )
                });
            return Err(ProviderError::from(message));
        }

        let reply: SendEmailReply = resp
            .json()
            .await
            .map_err(|e| ProviderError::from(format!("Invalid provider response: {e}")))?;

        Ok(reply.id)
    }
}
