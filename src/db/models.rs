use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{QuoteOrigin, Quotation};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbQuote {
    pub id: i64,
    pub quote_text: String,
    pub quote_author: String,
    pub saved_at: DateTime<Utc>,
}

impl From<DbQuote> for Quotation {
    fn from(row: DbQuote) -> Self {
        Quotation {
            id: Some(row.id),
            text: row.quote_text,
            author: row.quote_author,
            origin: QuoteOrigin::Cached,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DbSavedQuote {
    pub id: i64,
    pub quote_text: String,
    pub quote_author: String,
    pub background_url: String,
    pub font_family: String,
    pub created_at: DateTime<Utc>,
}
