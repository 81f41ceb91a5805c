use crate::db::{DbSavedQuote, SavedQuoteCreate, SavedQuotePatch};
use crate::error::LuminousError;
use crate::server::router::LuminousState;
use crate::server::routes::invalid_body;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};

pub fn router() -> Router<LuminousState> {
    Router::new()
        .route("/saved-quotes", get(list_saved).post(create_saved))
        .route("/saved-quotes/{id}", patch(patch_saved).delete(delete_saved))
}

/// Incoming body for a new saved selection. Every field is required and non-blank.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuoteBody {
    pub quote_text: Option<String>,
    pub quote_author: Option<String>,
    pub background_url: Option<String>,
    pub font_family: Option<String>,
}

impl SavedQuoteBody {
    fn into_create(self) -> Option<SavedQuoteCreate> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(SavedQuoteCreate {
            quote_text: present(self.quote_text)?,
            quote_author: present(self.quote_author)?,
            background_url: present(self.background_url)?,
            font_family: present(self.font_family)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub success: bool,
}

/// GET /saved-quotes
pub async fn list_saved(
    State(state): State<LuminousState>,
) -> Result<Json<Vec<DbSavedQuote>>, LuminousError> {
    Ok(Json(state.db.list_saved_quotes().await?))
}

/// POST /saved-quotes
pub async fn create_saved(
    State(state): State<LuminousState>,
    payload: Result<Json<SavedQuoteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<DbSavedQuote>), LuminousError> {
    let Json(body) = payload.map_err(|e| invalid_body(&e))?;
    let create = body.into_create().ok_or_else(|| {
        LuminousError::bad_request("MISSING_FIELDS", "Missing required fields")
    })?;

    let saved = state.db.create_saved_quote(create).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PATCH /saved-quotes/{id}
///
/// Only `backgroundUrl` and `fontFamily` can change; blank values are ignored.
pub async fn patch_saved(
    State(state): State<LuminousState>,
    Path(id): Path<i64>,
    payload: Result<Json<SavedQuotePatch>, JsonRejection>,
) -> Result<Json<DbSavedQuote>, LuminousError> {
    let Json(patch) = payload.map_err(|e| invalid_body(&e))?;
    let patch = SavedQuotePatch {
        background_url: patch.background_url.filter(|s| !s.trim().is_empty()),
        font_family: patch.font_family.filter(|s| !s.trim().is_empty()),
    };

    state
        .db
        .patch_saved_quote(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| LuminousError::NotFound(format!("saved quote {id}")))
}

/// DELETE /saved-quotes/{id}
///
/// Deleting an id that does not exist still reports success.
pub async fn delete_saved(
    State(state): State<LuminousState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResult>, LuminousError> {
    let removed = state.db.delete_saved_quote(id).await?;
    if !removed {
        tracing::debug!(id, "Delete of unknown saved quote");
    }
    Ok(Json(DeleteResult { success: true }))
}
