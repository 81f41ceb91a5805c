use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{BackgroundPhoto, ImageService, Quotation};

/// One live source of quotations.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Performs one outbound call and returns the first usable quotation, tagged `Live`.
    async fn fetch_random(&self) -> Result<Quotation, ProviderError>;
}

/// One image service that can serve a background photo.
///
/// The resolver only ever asks for `service()` and `credential()` to decide whether to
/// attempt a provider; everything provider-specific stays behind `fetch_one`.
#[async_trait]
pub trait BackgroundProvider: Send + Sync {
    fn service(&self) -> ImageService;

    /// Access credential as configured, before any placeholder check.
    fn credential(&self) -> Option<&str>;

    /// Performs one outbound search for `term` and maps the first usable image.
    async fn fetch_one(&self, term: &str) -> Result<BackgroundPhoto, ProviderError>;
}
