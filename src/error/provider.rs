use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error as ThisError;

use super::IsRetryable;

/// Failure of a single outbound provider attempt.
///
/// The resolver never surfaces these; they only decide whether the next tier runs.
#[derive(Debug, ThisError)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, reqwest timeouts, etc).
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Upstream error with status: {status}, body={body:.200}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("Upstream payload could not be parsed: {0}")]
    Payload(#[from] serde_json::Error),

    /// The payload parsed but held nothing usable (empty list, blank fields, no image URL).
    #[error("Upstream payload unusable: {0}")]
    Unusable(String),

    #[error("Provider attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl IsRetryable for ProviderError {
    fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Reqwest(e) => !e.is_timeout(),
            ProviderError::UpstreamStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
