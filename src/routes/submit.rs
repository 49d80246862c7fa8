use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, DispatchError};
use crate::state::SharedState;
use crate::submission::{parser, pipeline, validate};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

pub async fn submit(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, AppError> {
    // An unreadable body is a server-side failure, not a validation error.
    let request = parser::parse_submission(&body).map_err(DispatchError::generic)?;

    let submission = validate::validate(request)?;
    let email_id = pipeline::run(&state, submission).await?;

    Ok(Json(SubmitResponse {
        message: "Question submitted successfully".to_string(),
        email_id,
    }))
}
