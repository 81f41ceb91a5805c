use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{ProviderDefaults, deserialize_credential_lax};

/// Pexels image provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PexelsConfig {
    /// Base API URL.
    /// TOML: `providers.pexels.api_url`. Default: `https://api.pexels.com`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// API key sent in the `Authorization` header. Unset or the placeholder value
    /// disables the provider.
    /// TOML: `providers.pexels.api_key`. Env: `PEXELS_API_KEY`.
    #[serde(default, deserialize_with = "deserialize_credential_lax")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub proxy: Option<Url>,

    #[serde(default)]
    pub enable_multiplexing: Option<bool>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub retry_max_times: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PexelsResolvedConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub timeout: Duration,
    pub retry_max_times: usize,
}

impl PexelsConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> PexelsResolvedConfig {
        PexelsResolvedConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(defaults.timeout_secs)),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
        }
    }
}

impl Default for PexelsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            proxy: None,
            enable_multiplexing: None,
            timeout_secs: None,
            retry_max_times: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.pexels.com").expect("valid default Pexels API URL")
}
