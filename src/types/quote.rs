use serde::{Deserialize, Serialize};

/// Which tier served a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    Live,
    Cached,
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Store surrogate key; only set on quotations read back from the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub author: String,
    pub origin: QuoteOrigin,
}

impl Quotation {
    pub fn new(text: impl Into<String>, author: impl Into<String>, origin: QuoteOrigin) -> Self {
        Self {
            id: None,
            text: text.into(),
            author: author.into(),
            origin,
        }
    }
}

/// One window of the persisted quotation sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePage {
    pub quotes: Vec<Quotation>,
    pub next_cursor: Option<i64>,
    pub has_more: bool,
}

impl QuotePage {
    pub fn empty() -> Self {
        Self {
            quotes: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }
}
