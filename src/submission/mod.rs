pub mod parser;
pub mod pipeline;
pub mod validate;

use serde::Deserialize;

/// Form payload as it arrives. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub question: Option<String>,
}

/// A validated question, alive for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: Option<String>,
    pub email: String,
    pub question: String,
}
