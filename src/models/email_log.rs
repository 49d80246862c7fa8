use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HTML and plain-text renditions of one question.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailContent {
    #[sqlx(rename = "email_html")]
    pub html: String,
    #[sqlx(rename = "email_text")]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Sent,
    Failed,
}

impl AuditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditStatus::Sent => "sent",
            AuditStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(AuditStatus::Sent),
            "failed" => Some(AuditStatus::Failed),
            _ => None,
        }
    }
}

/// One persisted submission attempt.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLog {
    pub id: Uuid,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub question: String,
    #[sqlx(flatten)]
    pub email_content: EmailContent,
    pub provider_message_id: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,
}

/// Insert payload; the store assigns `id` and `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmailLog {
    pub sender_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    pub question: String,
    pub email_content: EmailContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EmailLogFilter {
    pub status: Option<AuditStatus>,
    pub sender_email: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailStats {
    pub total: i64,
    pub sent: i64,
    pub failed: i64,
    pub unique_senders: i64,
}
