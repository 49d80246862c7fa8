use std::sync::Arc;

use crate::audit::{AuditLogger, AuditStore};
use crate::config::Config;
use crate::email::EmailProvider;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn AuditStore>,
    pub provider: Arc<dyn EmailProvider>,
    pub audit: AuditLogger,
}
