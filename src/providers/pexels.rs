use async_trait::async_trait;
use backon::ExponentialBuilder;
use rand::seq::IndexedRandom;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use super::policy::credential_usable;
use super::traits::BackgroundProvider;
use super::upstream_retry::{get_json_with_retry, retry_policy};
use crate::config::PexelsResolvedConfig;
use crate::error::ProviderError;
use crate::types::{BackgroundOrigin, BackgroundPhoto, ImageService};

pub const PEXELS_PROVIDER: &str = "pexels";

const SEARCH_PAGE_SIZE: &str = "15";

#[derive(Debug, Deserialize)]
struct PexelsSearch {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    /// Photo page on pexels.com.
    url: String,
    photographer: String,
    photographer_url: String,
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    #[serde(default)]
    original: Option<String>,
    #[serde(default)]
    large2x: Option<String>,
}

impl PexelsSrc {
    fn direct_url(&self) -> Option<&str> {
        [self.large2x.as_deref(), self.original.as_deref()]
            .into_iter()
            .flatten()
            .find(|u| !u.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct PexelsClient {
    client: reqwest::Client,
    api_url: Url,
    api_key: Option<String>,
    retry_policy: ExponentialBuilder,
}

impl PexelsClient {
    pub fn new(cfg: &PexelsResolvedConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: cfg.api_url.clone(),
            api_key: cfg.api_key.clone(),
            retry_policy: retry_policy(cfg.retry_max_times),
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| credential_usable(ImageService::Pexels, Some(k)))
            .ok_or_else(|| ProviderError::Unusable("Pexels API key not configured".into()))?;

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(key)
            .map_err(|_| ProviderError::Unusable("Pexels API key is not a valid header".into()))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

#[async_trait]
impl BackgroundProvider for PexelsClient {
    fn service(&self) -> ImageService {
        ImageService::Pexels
    }

    fn credential(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    async fn fetch_one(&self, term: &str) -> Result<BackgroundPhoto, ProviderError> {
        let headers = self.auth_headers()?;
        let mut url = self.api_url.join("v1/search")?;
        url.query_pairs_mut()
            .append_pair("query", term)
            .append_pair("orientation", "landscape")
            .append_pair("per_page", SEARCH_PAGE_SIZE);

        let search: PexelsSearch = get_json_with_retry(
            PEXELS_PROVIDER,
            &self.client,
            &url,
            Some(headers),
            self.retry_policy,
        )
        .await?;

        pick_background(search)
    }
}

/// Picks one search hit at random among those with a direct image URL.
fn pick_background(search: PexelsSearch) -> Result<BackgroundPhoto, ProviderError> {
    let candidates: Vec<&PexelsPhoto> = search
        .photos
        .iter()
        .filter(|p| p.src.direct_url().is_some())
        .collect();

    let photo = candidates
        .choose(&mut rand::rng())
        .copied()
        .ok_or_else(|| ProviderError::Unusable("Pexels search returned no usable photos".into()))?;

    Ok(BackgroundPhoto {
        id: photo.id.to_string(),
        url: photo.src.direct_url().unwrap_or_default().to_string(),
        attribution_name: photo.photographer.clone(),
        attribution_profile_url: photo.photographer_url.clone(),
        source_page_url: photo.url.clone(),
        origin: BackgroundOrigin::Pexels,
        download_location: None,
    })
}
