pub mod dispatch;
pub mod resend;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderConfig;

pub use resend::ResendProvider;
pub use smtp::SmtpProvider;

/// A fully addressed message ready for the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Raw failure reported by an email provider.
#[derive(Debug)]
pub struct ProviderError {
    pub message: String,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for ProviderError {
    fn from(s: String) -> Self {
        ProviderError { message: s }
    }
}

impl From<&str> for ProviderError {
    fn from(s: &str) -> Self {
        ProviderError {
            message: s.to_string(),
        }
    }
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Send one message. Returns the provider's message id when it gives one.
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, ProviderError>;
}

pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn EmailProvider>, String> {
    let provider: Arc<dyn EmailProvider> = match config {
        ProviderConfig::Resend { api_key, api_url } => {
            Arc::new(ResendProvider::new(api_key.clone(), api_url.clone())?)
        }
        ProviderConfig::Smtp(smtp) => Arc::new(SmtpProvider::new(smtp)?),
    };
    Ok(provider)
}
