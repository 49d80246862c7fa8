use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::audit::StoreError;

/// Client-caused rejection of a submission. Checked before any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingField,
    InvalidEmailFormat,
    QuestionTooShort,
}

impl ValidationError {
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::MissingField => "Email and question are required",
            ValidationError::InvalidEmailFormat => "Invalid email format",
            ValidationError::QuestionTooShort => "Question must be at least 10 characters long",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchErrorKind {
    ProviderAuth,
    ProviderDomain,
    Generic,
}

impl DispatchErrorKind {
    pub fn client_message(self) -> &'static str {
        match self {
            DispatchErrorKind::ProviderAuth => "Email service configuration error",
            DispatchErrorKind::ProviderDomain => "Email domain not verified",
            DispatchErrorKind::Generic => "Failed to send email",
        }
    }
}

/// Classify a provider failure by its description.
///
/// Providers give us no structured code, so this matches on wording. If the
/// provider rewords its errors everything silently falls through to
/// `Generic`; keep an eye on the `dispatch failed` warnings.
pub fn classify(description: &str) -> DispatchErrorKind {
    if description.contains("API key") {
        DispatchErrorKind::ProviderAuth
    } else if description.contains("domain") {
        DispatchErrorKind::ProviderDomain
    } else {
        DispatchErrorKind::Generic
    }
}

/// Server-side failure to get a submission out of the door.
#[derive(Debug, Clone)]
pub struct DispatchError {
    pub kind: DispatchErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn from_description(message: impl Into<String>) -> Self {
        let message = message.into();
        DispatchError {
            kind: classify(&message),
            message,
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        DispatchError {
            kind: DispatchErrorKind::Generic,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Validation(ValidationError),
    Dispatch(DispatchError),
    Store(StoreError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Validation(err) => write!(f, "Bad Request: {err}"),
            AppError::Dispatch(err) => write!(f, "Dispatch Error: {err}"),
            AppError::Store(err) => write!(f, "Store Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.message()),
            AppError::Dispatch(err) => {
                tracing::error!(kind = ?err.kind, "Submission failed: {}", err.message);
                (StatusCode::INTERNAL_SERVER_ERROR, err.kind.client_message())
            }
            AppError::Store(err) => {
                tracing::error!("Audit store error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve emails")
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::Dispatch(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}
