use std::sync::Arc;

use tokio::task::JoinHandle;

use super::AuditSink;
use crate::models::NewEmailLog;

/// Fire-and-forget writer for submission attempts.
#[derive(Clone)]
pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Write `entry` on a detached task. Failures are logged and dropped.
    ///
    /// Callers on the request path discard the handle; nothing waits for the
    /// write, and a write still in flight at shutdown is lost.
    pub fn spawn(&self, entry: NewEmailLog) -> JoinHandle<()> {
        let sink = self.sink.clone();
        tokio::spawn(async move {
            match sink.write(&entry).await {
                Ok(id) => tracing::info!(
                    log_id = %id,
                    status = entry.status.as_str(),
                    "Submission attempt logged"
                ),
                Err(e) => tracing::warn!(
                    sender = %entry.sender_email,
                    status = entry.status.as_str(),
                    "Failed to log submission attempt: {e}"
                ),
            }
        })
    }
}
