use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::ProviderDefaults;

/// ZenQuotes live quotation provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZenQuotesConfig {
    /// Base API URL; the client requests `{api_url}/api/random`.
    /// TOML: `providers.zenquotes.api_url`. Default: `https://zenquotes.io`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

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
pub struct ZenQuotesResolvedConfig {
    pub api_url: Url,
    pub proxy: Option<Url>,
    pub enable_multiplexing: bool,
    pub timeout: Duration,
    pub retry_max_times: usize,
}

impl ZenQuotesConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> ZenQuotesResolvedConfig {
        ZenQuotesResolvedConfig {
            api_url: self.api_url.clone(),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            enable_multiplexing: self
                .enable_multiplexing
                .unwrap_or(defaults.enable_multiplexing),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(defaults.timeout_secs)),
            retry_max_times: self.retry_max_times.unwrap_or(defaults.retry_max_times),
        }
    }
}

impl Default for ZenQuotesConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            proxy: None,
            enable_multiplexing: None,
            timeout_secs: None,
            retry_max_times: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://zenquotes.io").expect("valid default ZenQuotes URL")
}
