use super::SubmitRequest;

/// Parse a `/submit` body into its optional fields.
///
/// The body is read as JSON whatever the Content-Type says; browsers posting
/// with `fetch` default to `text/plain`.
pub fn parse_submission(body: &[u8]) -> Result<SubmitRequest, String> {
    serde_json::from_slice(body).map_err(|e| format!("Invalid submission payload: {e}"))
}
