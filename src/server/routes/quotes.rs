use crate::db::QuoteStore;
use crate::error::LuminousError;
use crate::server::router::LuminousState;
use crate::service::clamp_limit;
use crate::types::{QuotePage, Quotation};

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub fn router() -> Router<LuminousState> {
    Router::new()
        .route("/quotes/random", get(random_quote))
        .route("/quotes", get(list_quotes))
        .route("/quotes/count", get(count_quotes))
}

/// Raw query values; parsed by hand so a bad `limit` falls back instead of rejecting.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    fn cursor(&self) -> Result<Option<i64>, LuminousError> {
        match self.cursor.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                LuminousError::bad_request("INVALID_CURSOR", format!("cursor {raw:?} is not an id"))
            }),
        }
    }

    fn limit(&self) -> u32 {
        clamp_limit(
            self.limit
                .as_deref()
                .and_then(|raw| raw.trim().parse::<i64>().ok()),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteCount {
    pub count: i64,
}

/// GET /quotes/random
///
/// Always answers 200 with a one-element array; the `origin` field tells which tier served it.
pub async fn random_quote(State(state): State<LuminousState>) -> Json<Vec<Quotation>> {
    Json(vec![state.resolver.resolve_quote().await])
}

/// GET /quotes?cursor=<id>&limit=<n>
pub async fn list_quotes(
    State(state): State<LuminousState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuotePage>, LuminousError> {
    let cursor = query.cursor()?;
    let limit = query.limit();

    let page = state
        .db
        .read_page_after(cursor, limit)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, ?cursor, limit, "Quote page read failed, serving empty page");
            QuotePage::empty()
        });
    Ok(Json(page))
}

/// GET /quotes/count
pub async fn count_quotes(State(state): State<LuminousState>) -> Json<QuoteCount> {
    let count = state.db.count().await.unwrap_or_else(|e| {
        warn!(error = %e, "Quote count failed, reporting zero");
        0
    });
    Json(QuoteCount { count })
}
