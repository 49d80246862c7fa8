pub mod logger;
pub mod postgres;
pub mod sink;

use async_trait::async_trait;

use crate::models::{AuditStatus, EmailLog, EmailLogFilter, EmailStats, NewEmailLog};

pub use logger::AuditLogger;
pub use postgres::PgAuditStore;
pub use sink::{AuditSink, HttpSink, StoreSink};

#[derive(Debug, Clone)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError { message: s }
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError {
            message: s.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: format!("Database error: {err}"),
        }
    }
}

/// Where audit records live. Ids are opaque strings to callers.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert(&self, entry: &NewEmailLog) -> Result<String, StoreError>;

    /// Matching records, newest first, at most `limit`.
    async fn find(&self, filter: &EmailLogFilter, limit: i64) -> Result<Vec<EmailLog>, StoreError>;

    async fn count(&self, filter: &EmailLogFilter) -> Result<i64, StoreError>;

    async fn distinct_senders(&self) -> Result<Vec<String>, StoreError>;
}

pub async fn stats(store: &dyn AuditStore) -> Result<EmailStats, StoreError> {
    let all = EmailLogFilter::default();
    let sent = EmailLogFilter {
        status: Some(AuditStatus::Sent),
        ..Default::default()
    };
    let failed = EmailLogFilter {
        status: Some(AuditStatus::Failed),
        ..Default::default()
    };

    let (total, sent, failed, senders) = tokio::try_join!(
        store.count(&all),
        store.count(&sent),
        store.count(&failed),
        store.distinct_senders(),
    )?;

    Ok(EmailStats {
        total,
        sent,
        failed,
        unique_senders: senders.len() as i64,
    })
}
