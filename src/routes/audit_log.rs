use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::models::{AuditStatus, EmailContent, NewEmailLog};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRequest {
    pub sender_email: Option<String>,
    pub sender_name: Option<String>,
    pub question: Option<String>,
    #[serde(default)]
    pub email_content: EmailContent,
    pub provider_message_id: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

impl AuditLogRequest {
    /// `None` when a required field is missing or empty, or the status is unknown.
    pub fn into_entry(self) -> Option<NewEmailLog> {
        let sender_email = self.sender_email.filter(|s| !s.is_empty())?;
        let question = self.question.filter(|s| !s.is_empty())?;
        let status = self.status.as_deref().and_then(AuditStatus::parse)?;

        Some(NewEmailLog {
            sender_email,
            sender_name: self.sender_name,
            question,
            email_content: self.email_content,
            provider_message_id: self.provider_message_id,
            status,
            error_message: self.error_message,
        })
    }
}

pub async fn create(State(state): State<SharedState>, body: Bytes) -> Response {
    let request: AuditLogRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Invalid audit log payload: {e}");
            return reply(StatusCode::INTERNAL_SERVER_ERROR, None);
        }
    };

    let Some(entry) = request.into_entry() else {
        tracing::warn!("Missing required fields for audit log");
        return reply(StatusCode::BAD_REQUEST, None);
    };

    match state.store.insert(&entry).await {
        Ok(id) => {
            tracing::debug!(log_id = %id, "Audit record stored");
            reply(StatusCode::OK, Some(id))
        }
        Err(e) => {
            tracing::error!("Failed to store audit record: {e}");
            reply(StatusCode::INTERNAL_SERVER_ERROR, None)
        }
    }
}

fn reply(status: StatusCode, log_id: Option<String>) -> Response {
    let body = match log_id {
        Some(id) => json!({ "success": true, "logId": id }),
        None => json!({ "success": false }),
    };
    (status, Json(body)).into_response()
}
