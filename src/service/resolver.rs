//! Tiered resolution of quotations and background photos.
//!
//! Both resolvers always produce a value: live sources first, then (for quotations)
//! the persisted cache, then the embedded static set.

use rand::seq::IndexedRandom;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::effective_search_terms;
use crate::db::QuoteStore;
use crate::error::ProviderError;
use crate::providers::policy::{attempt_order, credential_usable};
use crate::providers::{BackgroundProvider, Providers, QuoteProvider, fallback};
use crate::types::{BackgroundPhoto, ProviderConfig, QuoteOrigin, Quotation};

const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(6);

#[derive(Clone)]
pub struct ContentResolver {
    quotes: Arc<dyn QuoteProvider>,
    backgrounds: Vec<Arc<dyn BackgroundProvider>>,
    store: Arc<dyn QuoteStore>,
    attempt_timeout: Duration,
}

impl ContentResolver {
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        backgrounds: Vec<Arc<dyn BackgroundProvider>>,
        store: Arc<dyn QuoteStore>,
    ) -> Self {
        Self {
            quotes,
            backgrounds,
            store,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    pub fn from_providers(providers: &Providers, store: Arc<dyn QuoteStore>) -> Self {
        Self::new(
            providers.quote_provider(),
            providers.background_providers(),
            store,
        )
        .with_attempt_timeout(providers.attempt_timeout)
    }

    /// Caps how long any single provider attempt may run before the next tier is tried.
    #[must_use]
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Returns a quotation from the first tier that has one: live, cached, static.
    ///
    /// A live quotation is handed back immediately; persisting it happens on a
    /// detached task whose failure is only logged.
    pub async fn resolve_quote(&self) -> Quotation {
        let provider = self.quotes.name();
        match bounded(self.attempt_timeout, self.quotes.fetch_random()).await {
            Ok(quote) => {
                debug!(provider, "Serving live quotation");
                self.persist_in_background(&quote);
                return quote;
            }
            Err(e) => {
                warn!(provider, error = %e, "Live quotation unavailable, trying cache");
            }
        }

        match self.store.read_all().await {
            Ok(cached) => {
                let picked = cached.choose(&mut rand::rng()).cloned();
                if let Some(quote) = picked {
                    return Quotation {
                        origin: QuoteOrigin::Cached,
                        ..quote
                    };
                }
                debug!("Quotation cache is empty");
            }
            Err(e) => {
                warn!(error = %e, "Quotation cache read failed");
            }
        }

        info!("Serving static quotation");
        fallback::random_quote()
    }

    /// Tries each enabled image service in priority order and returns the first
    /// usable photo, or one from the static set.
    ///
    /// Services without a usable credential are skipped without any outbound call.
    pub async fn resolve_background(
        &self,
        provider_configs: &[ProviderConfig],
        search_terms: &[String],
    ) -> BackgroundPhoto {
        let terms = effective_search_terms(search_terms);

        for cfg in attempt_order(provider_configs) {
            let Some(provider) = self.backgrounds.iter().find(|p| p.service() == cfg.name)
            else {
                debug!(service = %cfg.name, "No client registered for image service, skipping");
                continue;
            };

            if !credential_usable(cfg.name, provider.credential()) {
                debug!(service = %cfg.name, "No usable credential, skipping");
                continue;
            }

            let term = terms.choose(&mut rand::rng()).cloned().unwrap_or_default();

            match bounded(self.attempt_timeout, provider.fetch_one(&term)).await {
                Ok(photo) => {
                    debug!(service = %cfg.name, term = %term, photo_id = %photo.id, "Serving background");
                    return photo;
                }
                Err(e) => {
                    warn!(service = %cfg.name, term = %term, error = %e, "Image service attempt failed");
                }
            }
        }

        info!("Serving static background");
        fallback::random_background()
    }

    fn persist_in_background(&self, quote: &Quotation) {
        let store = Arc::clone(&self.store);
        let text = quote.text.clone();
        let author = quote.author.clone();

        tokio::spawn(async move {
            match store.insert_if_absent(&text, &author).await {
                Ok(true) => debug!(author = %author, "Cached new quotation"),
                Ok(false) => debug!(author = %author, "Quotation already cached"),
                Err(e) => warn!(error = %e, "Failed to cache quotation"),
            }
        });
    }
}

async fn bounded<T>(
    limit: Duration,
    attempt: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(limit, attempt)
        .await
        .map_err(|_| ProviderError::Timeout(limit))?
}
