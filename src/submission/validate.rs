use std::sync::LazyLock;

use regex::Regex;

use super::{SubmitRequest, Submission};
use crate::error::ValidationError;

pub const MIN_QUESTION_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check the raw fields. Rules apply in order and the first failure wins.
pub fn check(email: Option<&str>, question: Option<&str>) -> Result<(), ValidationError> {
    let email = email.filter(|e| !e.is_empty()).ok_or(ValidationError::MissingField)?;
    let question = question
        .filter(|q| !q.is_empty())
        .ok_or(ValidationError::MissingField)?;

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    // UTF-16 code units, the unit browser-side form checks count in.
    if question.trim().encode_utf16().count() < MIN_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooShort);
    }

    Ok(())
}

pub fn validate(request: SubmitRequest) -> Result<Submission, ValidationError> {
    check(request.email.as_deref(), request.question.as_deref())?;

    let (Some(email), Some(question)) = (request.email, request.question) else {
        return Err(ValidationError::MissingField);
    };

    Ok(Submission {
        // An empty name counts as no name.
        name: request.name.filter(|n| !n.is_empty()),
        email,
        question,
    })
}
