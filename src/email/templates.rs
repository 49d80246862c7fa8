use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::EmailContent;
use crate::submission::Submission;

const NAME_PLACEHOLDER: &str = "Not provided";

#[derive(Template)]
#[template(path = "email/question.html")]
struct QuestionHtml<'a> {
    site_name: &'a str,
    name: &'a str,
    email: &'a str,
    question: &'a str,
    received_at: &'a str,
}

#[derive(Template)]
#[template(path = "email/question.txt")]
struct QuestionText<'a> {
    site_name: &'a str,
    name: &'a str,
    email: &'a str,
    question: &'a str,
    received_at: &'a str,
}

/// Render the HTML and plain-text bodies for a question.
///
/// Output depends only on the arguments; `received_at` is the one field that
/// changes between otherwise identical submissions. HTML values are escaped.
pub fn render_question(
    submission: &Submission,
    site_name: &str,
    received_at: DateTime<Utc>,
) -> Result<EmailContent, String> {
    let received_at = received_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let name = submission.name.as_deref().unwrap_or(NAME_PLACEHOLDER);

    let html = QuestionHtml {
        site_name,
        name,
        email: &submission.email,
        question: &submission.question,
        received_at: &received_at,
    }
    .render()
    .map_err(|e| format!("Failed to render HTML body: {e}"))?;

    let text = QuestionText {
        site_name,
        name,
        email: &submission.email,
        question: &submission.question,
        received_at: &received_at,
    }
    .render()
    .map_err(|e| format!("Failed to render text body: {e}"))?;

    Ok(EmailContent {
        html,
        text: text.trim().to_string(),
    })
}
