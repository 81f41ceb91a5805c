use async_trait::async_trait;

use crate::error::LuminousError;
use crate::types::{QuotePage, Quotation};

/// Narrow read/write view of the quotation cache used by the resolver and quote routes.
///
/// Implementations must be safe for concurrent use and make the existence check and
/// insert of `insert_if_absent` a single atomic step.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Inserts `(text, author)` unless that exact pair already exists.
    /// Returns `true` when a new row was written.
    async fn insert_if_absent(&self, text: &str, author: &str) -> Result<bool, LuminousError>;

    /// All cached quotations in ascending id order.
    async fn read_all(&self) -> Result<Vec<Quotation>, LuminousError>;

    /// Up to `limit` quotations with id greater than `cursor` (from the start when `None`).
    async fn read_page_after(
        &self,
        cursor: Option<i64>,
        limit: u32,
    ) -> Result<QuotePage, LuminousError>;

    async fn count(&self) -> Result<i64, LuminousError>;
}
