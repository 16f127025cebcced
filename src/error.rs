use crate::models::GraphQlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StashError {
    #[error("missing API key: set STASH_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or unexpected response format: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error(
        "{operation} returned no data ({} error(s)): {}",
        .errors.len(),
        first_message(.errors)
    )]
    MissingData {
        operation: &'static str,
        errors: Vec<GraphQlError>,
    },

    #[error("api rejected request: {0}")]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated (401)")]
    Unauthorized,

    #[error("forbidden (403)")]
    Forbidden,

    #[error("endpoint not found (404)")]
    NotFound,

    #[error("unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

fn first_message(errors: &[GraphQlError]) -> &str {
    errors
        .first()
        .map(|e| e.message.as_str())
        .unwrap_or("no error detail")
}
