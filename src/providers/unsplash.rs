use async_trait::async_trait;
use backon::ExponentialBuilder;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::policy::credential_usable;
use super::traits::BackgroundProvider;
use super::upstream_retry::{get_json_with_retry, retry_policy};
use crate::config::UnsplashResolvedConfig;
use crate::error::ProviderError;
use crate::types::{BackgroundOrigin, BackgroundPhoto, ImageService};

pub const UNSPLASH_PROVIDER: &str = "unsplash";

/// Referral parameters Unsplash requires on attribution links.
const REFERRAL_QUERY: &str = "utm_source=luminous&utm_medium=referral";
/// Sizing applied to the raw image URL.
const RAW_SIZING: &str = "w=1920&q=80";

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    urls: UnsplashUrls,
    user: UnsplashUser,
    links: UnsplashPhotoLinks,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    raw: Option<String>,
    full: Option<String>,
    regular: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    name: String,
    links: UnsplashUserLinks,
}

#[derive(Debug, Deserialize)]
struct UnsplashUserLinks {
    html: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhotoLinks {
    html: String,
    #[serde(default)]
    download_location: Option<String>,
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    api_url: Url,
    access_key: Option<String>,
    retry_policy: ExponentialBuilder,
}

impl UnsplashClient {
    pub fn new(cfg: &UnsplashResolvedConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: cfg.api_url.clone(),
            access_key: cfg.access_key.clone(),
            retry_policy: retry_policy(cfg.retry_max_times),
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap, ProviderError> {
        let key = self
            .access_key
            .as_deref()
            .filter(|k| credential_usable(ImageService::Unsplash, Some(k)))
            .ok_or_else(|| ProviderError::Unusable("Unsplash access key not configured".into()))?;

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Client-ID {key}"))
            .map_err(|_| ProviderError::Unusable("Unsplash access key is not a valid header".into()))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Download-tracking locations must point at the configured API host, since the
    /// access key is sent along with the ping.
    pub fn accepts_download_location(&self, location: &Url) -> bool {
        location.scheme() == self.api_url.scheme()
            && location.host_str() == self.api_url.host_str()
            && location.port_or_known_default() == self.api_url.port_or_known_default()
    }

    /// Pings the photo's download-tracking endpoint, as Unsplash asks of clients that
    /// display a photo. Best-effort: failures are logged only.
    pub async fn track_download(&self, location: Url) {
        let Ok(headers) = self.auth_headers() else {
            debug!("Skipping Unsplash download tracking: no usable access key");
            return;
        };
        if !self.accepts_download_location(&location) {
            warn!(location = %location, "Skipping Unsplash download tracking: foreign host");
            return;
        }

        match self.client.get(location).headers(headers).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Unsplash download tracked");
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Unsplash download tracking rejected");
            }
            Err(e) => {
                warn!(error = %e, "Failed to trigger Unsplash download endpoint");
            }
        }
    }
}

#[async_trait]
impl BackgroundProvider for UnsplashClient {
    fn service(&self) -> ImageService {
        ImageService::Unsplash
    }

    fn credential(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    async fn fetch_one(&self, term: &str) -> Result<BackgroundPhoto, ProviderError> {
        let headers = self.auth_headers()?;
        let mut url = self.api_url.join("photos/random")?;
        url.query_pairs_mut()
            .append_pair("query", term)
            .append_pair("orientation", "landscape")
            .append_pair("content_filter", "high");

        let photo: UnsplashPhoto = get_json_with_retry(
            UNSPLASH_PROVIDER,
            &self.client,
            &url,
            Some(headers),
            self.retry_policy,
        )
        .await?;

        into_background(photo)
    }
}

fn into_background(photo: UnsplashPhoto) -> Result<BackgroundPhoto, ProviderError> {
    let url = direct_url(&photo.urls)
        .ok_or_else(|| ProviderError::Unusable("Unsplash photo has no image URL".into()))?;

    Ok(BackgroundPhoto {
        id: photo.id,
        url,
        attribution_name: photo.user.name,
        attribution_profile_url: with_query(&photo.user.links.html, REFERRAL_QUERY),
        source_page_url: with_query(&photo.links.html, REFERRAL_QUERY),
        origin: BackgroundOrigin::Unsplash,
        download_location: photo.links.download_location.filter(|l| !l.is_empty()),
    })
}

fn direct_url(urls: &UnsplashUrls) -> Option<String> {
    let non_empty = |u: &Option<String>| u.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string);
    non_empty(&urls.raw)
        .map(|raw| with_query(&raw, RAW_SIZING))
        .or_else(|| non_empty(&urls.full))
        .or_else(|| non_empty(&urls.regular))
}

fn with_query(base: &str, query: &str) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn photo(urls: serde_json::Value) -> UnsplashPhoto {
        serde_json::from_value(json!({
            "id": "abc123",
            "urls": urls,
            "user": { "name": "Ada", "links": { "html": "https://unsplash.com/@ada" } },
            "links": {
                "html": "https://unsplash.com/photos/abc123",
                "download_location": "https://api.unsplash.com/photos/abc123/download"
            }
        }))
        .expect("valid test photo")
    }

    #[test]
    fn raw_url_gets_sizing_and_links_get_referral() {
        let bg = into_background(photo(json!({
            "raw": "https://images.unsplash.com/photo-1?ixid=x"
        })))
        .expect("usable photo");

        assert_eq!(bg.url, "https://images.unsplash.com/photo-1?ixid=x&w=1920&q=80");
        assert_eq!(
            bg.attribution_profile_url,
            "https://unsplash.com/@ada?utm_source=luminous&utm_medium=referral"
        );
        assert_eq!(
            bg.source_page_url,
            "https://unsplash.com/photos/abc123?utm_source=luminous&utm_medium=referral"
        );
        assert_eq!(bg.origin, BackgroundOrigin::Unsplash);
        assert_eq!(
            bg.download_location.as_deref(),
            Some("https://api.unsplash.com/photos/abc123/download")
        );
    }

    #[test]
    fn falls_back_to_other_sizes_and_rejects_missing_urls() {
        let bg = into_background(photo(json!({ "raw": "", "regular": "https://img/regular" })))
            .expect("usable photo");
        assert_eq!(bg.url, "https://img/regular");

        assert!(into_background(photo(json!({}))).is_err());
    }
}
