use async_trait::async_trait;
use sqlx::PgPool;

use super::{AuditStore, StoreError};
use crate::db;
use crate::models::{EmailLog, EmailLogFilter, NewEmailLog};

pub struct PgAuditStore {
    pool: PgPool,
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn insert(&self, entry: &NewEmailLog) -> Result<String, StoreError> {
        let id = db::email_log::create(&self.pool, entry).await?;
        Ok(id.to_string())
    }

    async fn find(&self, filter: &EmailLogFilter, limit: i64) -> Result<Vec<EmailLog>, StoreError> {
        Ok(db::email_log::list(&self.pool, filter, limit).await?)
    }

    async fn count(&self, filter: &EmailLogFilter) -> Result<i64, StoreError> {
        Ok(db::email_log::count(&self.pool, filter).await?)
    }

    async fn distinct_senders(&self) -> Result<Vec<String>, StoreError> {
        Ok(db::email_log::distinct_senders(&self.pool).await?)
    }
}
