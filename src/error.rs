use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    #[error("invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u128 },

    #[error("API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}
