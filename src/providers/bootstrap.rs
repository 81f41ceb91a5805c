use crate::config::Config;
use crate::providers::{
    BackgroundProvider, PexelsClient, QuoteProvider, UnsplashClient, ZenQuotesClient,
};
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

pub const LUMINOUS_USER_AGENT: &str = concat!("luminous/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
/// Slack added on top of a provider's own request budget before the resolver gives up on it.
const ATTEMPT_SLACK: Duration = Duration::from_secs(1);
const RELAY_MAX_REDIRECTS: usize = 5;

/// Clients for every upstream the service talks to.
///
/// Kept as a plain struct; the resolver only sees the trait objects handed out below.
#[derive(Clone)]
pub struct Providers {
    pub zenquotes: ZenQuotesClient,
    pub unsplash: UnsplashClient,
    pub pexels: PexelsClient,
    /// Client for `/proxy-image`; follows redirects, no provider credentials attached.
    pub relay: reqwest::Client,
    /// Upper bound for one resolver attempt against any provider.
    pub attempt_timeout: Duration,
}

impl Providers {
    pub fn new(cfg: &Config) -> Self {
        let provider_defaults = &cfg.providers.defaults;
        let zenquotes_cfg = cfg.zenquotes();
        let unsplash_cfg = cfg.unsplash();
        let pexels_cfg = cfg.pexels();

        // Log resolved provider configs here so `main` stays wiring-only.
        info!(
            providers_defaults_proxy = %provider_defaults.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            providers_defaults_enable_multiplexing = provider_defaults.enable_multiplexing,
            providers_defaults_timeout_secs = provider_defaults.timeout_secs,
            providers_defaults_retry_max_times = provider_defaults.retry_max_times,
            "Provider defaults loaded"
        );
        info!(
            zenquotes_api_url = %zenquotes_cfg.api_url,
            zenquotes_proxy = %zenquotes_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            zenquotes_timeout = ?zenquotes_cfg.timeout,
            zenquotes_retry_max_times = zenquotes_cfg.retry_max_times,
            "ZenQuotes config (effective)"
        );
        info!(
            unsplash_api_url = %unsplash_cfg.api_url,
            unsplash_proxy = %unsplash_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            unsplash_timeout = ?unsplash_cfg.timeout,
            unsplash_retry_max_times = unsplash_cfg.retry_max_times,
            unsplash_key_configured = unsplash_cfg.access_key.is_some(),
            "Unsplash config (effective)"
        );
        info!(
            pexels_api_url = %pexels_cfg.api_url,
            pexels_proxy = %pexels_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            pexels_timeout = ?pexels_cfg.timeout,
            pexels_retry_max_times = pexels_cfg.retry_max_times,
            pexels_key_configured = pexels_cfg.api_key.is_some(),
            "Pexels config (effective)"
        );

        let attempt_timeout = [
            attempt_budget(zenquotes_cfg.timeout, zenquotes_cfg.retry_max_times),
            attempt_budget(unsplash_cfg.timeout, unsplash_cfg.retry_max_times),
            attempt_budget(pexels_cfg.timeout, pexels_cfg.retry_max_times),
        ]
        .into_iter()
        .max()
        .unwrap_or(ATTEMPT_SLACK);

        let zenquotes = ZenQuotesClient::new(
            &zenquotes_cfg,
            build_client(
                zenquotes_cfg.proxy.clone(),
                zenquotes_cfg.enable_multiplexing,
                zenquotes_cfg.timeout,
                Policy::none(),
            ),
        );
        let unsplash = UnsplashClient::new(
            &unsplash_cfg,
            build_client(
                unsplash_cfg.proxy.clone(),
                unsplash_cfg.enable_multiplexing,
                unsplash_cfg.timeout,
                Policy::none(),
            ),
        );
        let pexels = PexelsClient::new(
            &pexels_cfg,
            build_client(
                pexels_cfg.proxy.clone(),
                pexels_cfg.enable_multiplexing,
                pexels_cfg.timeout,
                Policy::none(),
            ),
        );
        let relay = build_client(
            provider_defaults.proxy.clone(),
            provider_defaults.enable_multiplexing,
            Duration::from_secs(provider_defaults.timeout_secs),
            Policy::limited(RELAY_MAX_REDIRECTS),
        );

        Self {
            zenquotes,
            unsplash,
            pexels,
            relay,
            attempt_timeout,
        }
    }

    pub fn quote_provider(&self) -> Arc<dyn QuoteProvider> {
        Arc::new(self.zenquotes.clone())
    }

    /// Every image provider, in canonical service order. Attempt order comes from settings.
    pub fn background_providers(&self) -> Vec<Arc<dyn BackgroundProvider>> {
        vec![Arc::new(self.unsplash.clone()), Arc::new(self.pexels.clone())]
    }
}

fn attempt_budget(timeout: Duration, retry_max_times: usize) -> Duration {
    let attempts = u32::try_from(retry_max_times.saturating_add(1)).unwrap_or(u32::MAX);
    timeout.saturating_mul(attempts).saturating_add(ATTEMPT_SLACK)
}

fn build_client(
    proxy: Option<Url>,
    enable_multiplexing: bool,
    timeout: Duration,
    redirect: Policy,
) -> reqwest::Client {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(LUMINOUS_USER_AGENT)
        .redirect(redirect)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout);

    if let Some(proxy_url) = proxy {
        let proxy =
            reqwest::Proxy::all(proxy_url.as_str()).expect("invalid proxy url for reqwest client");
        builder = builder.proxy(proxy);
    }

    if enable_multiplexing {
        builder = builder.http2_adaptive_window(true);
    } else {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        builder = builder
            .http1_only()
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Duration::from_secs(0));
    }

    builder
        .default_headers(headers)
        .build()
        .expect("failed to build reqwest client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_budget_covers_every_retry() {
        assert_eq!(
            attempt_budget(Duration::from_secs(5), 0),
            Duration::from_secs(6)
        );
        assert_eq!(
            attempt_budget(Duration::from_secs(2), 2),
            Duration::from_secs(7)
        );
    }
}
