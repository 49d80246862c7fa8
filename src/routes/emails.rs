use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::audit;
use crate::error::AppError;
use crate::models::{AuditStatus, EmailLogFilter};
use crate::state::SharedState;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub stats: Option<String>,
    pub status: Option<String>,
    pub sender: Option<String>,
}

/// Unparseable or non-positive limits fall back to the default.
pub fn parse_limit(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n > 0 => n.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    if params.stats.as_deref() == Some("true") {
        let stats = audit::stats(state.store.as_ref()).await?;
        return Ok(Json(stats).into_response());
    }

    let status = match params.status.as_deref() {
        None | Some("") => None,
        Some(s) => Some(
            AuditStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {s}")))?,
        ),
    };

    let filter = EmailLogFilter {
        status,
        sender_email: params.sender.filter(|s| !s.is_empty()),
    };
    let limit = parse_limit(params.limit.as_deref());

    let emails = state.store.find(&filter, limit).await?;

    Ok(Json(json!({
        "count": emails.len(),
        "emails": emails,
    }))
    .into_response())
}
