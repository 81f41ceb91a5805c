pub mod backgrounds;
pub mod proxy;
pub mod quotes;
pub mod saved_quotes;

use crate::error::LuminousError;
use axum::extract::rejection::JsonRejection;

/// Maps a body that failed to parse as JSON onto the API's 400 shape.
pub(crate) fn invalid_body(rejection: &JsonRejection) -> LuminousError {
    LuminousError::bad_request("INVALID_BODY", rejection.body_text())
}
