use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{AuditStore, StoreError};
use crate::models::NewEmailLog;

/// Destination for audit writes issued by the submission pipeline.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn write(&self, entry: &NewEmailLog) -> Result<String, StoreError>;
}

pub struct StoreSink {
    store: Arc<dyn AuditStore>,
}

impl StoreSink {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuditSink for StoreSink {
    async fn write(&self, entry: &NewEmailLog) -> Result<String, StoreError> {
        self.store.insert(entry).await
    }
}

/// Posts records to the public `/audit-log` endpoint.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditLogReply {
    success: bool,
    log_id: Option<String>,
}

impl HttpSink {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("Failed to build audit HTTP client: {e}"))?;

        Ok(Self {
            client,
            url: format!("{}/audit-log", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AuditSink for HttpSink {
    async fn write(&self, entry: &NewEmailLog) -> Result<String, StoreError> {
        let resp = self
            .client
            .post(&self.url)
            .json(entry)
            .send()
            .await
            .map_err(|e| StoreError::from(format!("Audit request failed: {e}")))?;

        let status = resp.status();
        let reply: AuditLogReply = resp
            .json()
            .await
            .map_err(|e| StoreError::from(format!("Invalid audit response ({status}): {e}")))?;

        match reply {
            AuditLogReply {
                success: true,
                log_id: Some(id),
            } => Ok(id),
            _ => Err(StoreError::from(format!("Audit endpoint rejected record ({status})"))),
        }
    }
}
