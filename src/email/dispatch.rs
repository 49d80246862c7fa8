use crate::config::MailConfig;
use crate::error::DispatchError;
use crate::models::EmailContent;
use crate::submission::Submission;

use super::{EmailProvider, OutboundEmail};

pub fn subject_for(submission: &Submission, site_name: &str) -> String {
    let name = submission.name.as_deref().unwrap_or("Anonymous");
    format!("New Question from {name} - {site_name}")
}

/// Address a rendered question to the operator inbox, replying to the sender.
pub fn build_outbound(
    mail: &MailConfig,
    submission: &Submission,
    content: &EmailContent,
) -> OutboundEmail {
    OutboundEmail {
        from: mail.from.clone(),
        to: vec![mail.to.clone()],
        reply_to: submission.email.clone(),
        subject: subject_for(submission, &mail.site_name),
        html: content.html.clone(),
        text: content.text.clone(),
    }
}

/// Send once. No retries; failures come back classified.
pub async fn dispatch(
    provider: &dyn EmailProvider,
    mail: &MailConfig,
    submission: &Submission,
    content: &EmailContent,
) -> Result<Option<String>, DispatchError> {
    let outbound = build_outbound(mail, submission, content);

    match provider.send(&outbound).await {
        Ok(id) => {
            tracing::info!(
                provider = provider.name(),
                email_id = id.as_deref().unwrap_or("-"),
                "Question forwarded"
            );
            Ok(id)
        }
        Err(e) => {
            let err = DispatchError::from_description(e.message);
            tracing::warn!(
                provider = provider.name(),
                kind = ?err.kind,
                "Dispatch failed: {}",
                err.message
            );
            Err(err)
        }
    }
}
