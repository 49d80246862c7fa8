pub mod audit_log;
pub mod emails;
pub mod submit;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/submit", post(submit::submit))
        .route("/audit-log", post(audit_log::create))
        .route("/emails", get(emails::list))
}
