pub mod email_log;

pub use email_log::{AuditStatus, EmailContent, EmailLog, EmailLogFilter, EmailStats, NewEmailLog};
