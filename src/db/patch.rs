use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuoteCreate {
    pub quote_text: String,
    pub quote_author: String,
    pub background_url: String,
    pub font_family: String,
}

/// Partial update for a saved selection; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuotePatch {
    pub background_url: Option<String>,
    pub font_family: Option<String>,
}

impl SavedQuotePatch {
    pub fn is_empty(&self) -> bool {
        self.background_url.is_none() && self.font_family.is_none()
    }
}
