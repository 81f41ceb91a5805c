use async_trait::async_trait;
use backon::ExponentialBuilder;
use serde::Deserialize;
use url::Url;

use super::traits::QuoteProvider;
use super::upstream_retry::{get_json_with_retry, retry_policy};
use crate::config::ZenQuotesResolvedConfig;
use crate::error::ProviderError;
use crate::types::{QuoteOrigin, Quotation};

pub const ZENQUOTES_PROVIDER: &str = "zenquotes";

/// One element of the `/api/random` array. Fields are optional so a single
/// malformed element does not sink the rest of the payload.
#[derive(Debug, Deserialize)]
struct ZenQuote {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    a: Option<String>,
}

#[derive(Clone)]
pub struct ZenQuotesClient {
    client: reqwest::Client,
    api_url: Url,
    retry_policy: ExponentialBuilder,
}

impl ZenQuotesClient {
    pub fn new(cfg: &ZenQuotesResolvedConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: cfg.api_url.clone(),
            retry_policy: retry_policy(cfg.retry_max_times),
        }
    }
}

#[async_trait]
impl QuoteProvider for ZenQuotesClient {
    fn name(&self) -> &'static str {
        ZENQUOTES_PROVIDER
    }

    async fn fetch_random(&self) -> Result<Quotation, ProviderError> {
        let url = self.api_url.join("api/random")?;
        let entries: Vec<ZenQuote> = get_json_with_retry(
            ZENQUOTES_PROVIDER,
            &self.client,
            &url,
            None,
            self.retry_policy,
        )
        .await?;

        first_usable(entries).ok_or_else(|| {
            ProviderError::Unusable("no entry with non-empty text and author".to_string())
        })
    }
}

fn first_usable(entries: Vec<ZenQuote>) -> Option<Quotation> {
    entries.into_iter().find_map(|entry| {
        let text = entry.q?.trim().to_string();
        let author = entry.a?.trim().to_string();
        (!text.is_empty() && !author.is_empty())
            .then(|| Quotation::new(text, author, QuoteOrigin::Live))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Vec<ZenQuote> {
        serde_json::from_str(raw).expect("valid test payload")
    }

    #[test]
    fn picks_first_element_with_text_and_author() {
        let entries = parse(
            r#"[{"q":"","a":"Nobody"},{"q":"Stay hungry.","a":" Steve Jobs ","h":"<blockquote/>"}]"#,
        );
        let quote = first_usable(entries).expect("usable quote");
        assert_eq!(quote.text, "Stay hungry.");
        assert_eq!(quote.author, "Steve Jobs");
        assert_eq!(quote.origin, QuoteOrigin::Live);
        assert_eq!(quote.id, None);
    }

    #[test]
    fn empty_or_blank_payload_is_unusable() {
        assert!(first_usable(parse("[]")).is_none());
        assert!(first_usable(parse(r#"[{"q":"  ","a":"x"},{"a":"only author"}]"#)).is_none());
    }

    #[test]
    fn non_array_payload_fails_to_parse() {
        assert!(serde_json::from_str::<Vec<ZenQuote>>(r#"{"q":"x","a":"y"}"#).is_err());
    }
}
