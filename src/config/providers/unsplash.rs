use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{ProviderDefaults, deserialize_credential_lax};

/// Unsplash image provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UnsplashConfig {
    /// Base API URL.
    /// TOML: `providers.unsplash.api_url`. Default: `https://api.unsplash.com`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Client-ID access key. Unset or the placeholder value disables the provider.
    /// TOML: `providers.unsplash.access_key`. Env: `UNSPLASH_ACCESS_KEY`.
    #[serde(default, deserialize_with = "deserialize_credential_lax")]
    pub access_key: Option<String>,

    /// Optional upstream HTTP proxy.
    /// Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Falls back to `providers.defaults.enable_multiplexing`.
    #[serde(default)]
    pub enable_multiplexing: Option<bool>,

    /// Falls back to `providers.defaults.timeout_secs`.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Falls back to `providers.defaults.retry_max_times`.
    #[serde(default)]
    pub retry_max_times: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct UnsplashResolvedConfig {
    pub api_url: Url,
    pub access_key: Option<String>,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub timeout: Duration,
    pub retry_max_times: usize,
}

impl UnsplashConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> UnsplashResolvedConfig {
        UnsplashResolvedConfig {
            api_url: self.api_url.clone(),
            access_key: self.access_key.clone(),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(defaults.timeout_secs)),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
        }
    }
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            access_key: None,
            proxy: None,
            enable_multiplexing: None,
            timeout_secs: None,
            retry_max_times: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.unsplash.com").expect("valid default Unsplash API URL")
}
