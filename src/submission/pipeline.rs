use chrono::Utc;

use crate::email::{dispatch, templates};
use crate::error::DispatchError;
use crate::models::{AuditStatus, EmailContent, NewEmailLog};
use crate::state::SharedState;

use super::Submission;

/// Render, dispatch and record one validated submission.
///
/// Returns the provider message id. The audit write for either outcome is
/// spawned and never awaited here, so a slow or unavailable store cannot
/// change what the caller sees.
pub async fn run(
    state: &SharedState,
    submission: Submission,
) -> Result<Option<String>, DispatchError> {
    let site_name = &state.config.mail.site_name;
    let content = match templates::render_question(&submission, site_name, Utc::now()) {
        Ok(content) => content,
        Err(e) => {
            let err = DispatchError::generic(e);
            let _ = state
                .audit
                .spawn(failed_entry(&submission, EmailContent::default(), &err));
            return Err(err);
        }
    };

    match dispatch::dispatch(
        state.provider.as_ref(),
        &state.config.mail,
        &submission,
        &content,
    )
    .await
    {
        Ok(email_id) => {
            let _ = state.audit.spawn(NewEmailLog {
                sender_email: submission.email,
                sender_name: submission.name,
                question: submission.question,
                email_content: content,
                provider_message_id: email_id.clone(),
                status: AuditStatus::Sent,
                error_message: None,
            });
            Ok(email_id)
        }
        Err(err) => {
            let _ = state.audit.spawn(failed_entry(&submission, content, &err));
            Err(err)
        }
    }
}

fn failed_entry(
    submission: &Submission,
    content: EmailContent,
    err: &DispatchError,
) -> NewEmailLog {
    NewEmailLog {
        sender_email: submission.email.clone(),
        sender_name: submission.name.clone(),
        question: submission.question.clone(),
        email_content: content,
        provider_message_id: None,
        status: AuditStatus::Failed,
        error_message: Some(err.message.clone()),
    }
}
