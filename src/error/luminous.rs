use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

use super::ProviderError;

#[derive(Debug, ThisError)]
pub enum LuminousError {
    #[error("Invalid request: {message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl LuminousError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        LuminousError::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for LuminousError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            LuminousError::BadRequest { code, message } => (
                StatusCode::BAD_REQUEST,
                ApiErrorObject {
                    code: code.to_string(),
                    message,
                },
            ),

            LuminousError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message,
                },
            ),

            LuminousError::DatabaseError(_)
            | LuminousError::RactorError(_)
            | LuminousError::UnexpectedError(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }

            LuminousError::JsonError(_) | LuminousError::Provider(ProviderError::Payload(_)) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "BAD_UPSTREAM_PAYLOAD".to_string(),
                    message: "Failed to parse upstream response.".to_string(),
                };
                (status, body)
            }

            LuminousError::Provider(_) | LuminousError::ReqwestError(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream service error.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
