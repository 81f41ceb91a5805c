mod pexels;
mod unsplash;
mod zenquotes;

pub use pexels::{PexelsConfig, PexelsResolvedConfig};
pub use unsplash::{UnsplashConfig, UnsplashResolvedConfig};
pub use zenquotes::{ZenQuotesConfig, ZenQuotesResolvedConfig};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

/// Global provider defaults (used when provider-level config is unset).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderDefaults {
    /// Optional upstream HTTP proxy. If set, used for reqwest clients.
    /// TOML: `providers.defaults.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing for reqwest clients; disabled forces HTTP/1.
    /// TOML: `providers.defaults.enable_multiplexing`. Default: `false`.
    #[serde(default = "default_enable_multiplexing")]
    pub enable_multiplexing: bool,

    /// Upper bound for a single upstream request, connect included.
    /// TOML: `providers.defaults.timeout_secs`. Default: `5`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts on upstream 5xx. `0` means exactly one outbound request per attempt.
    /// TOML: `providers.defaults.retry_max_times`. Default: `0`.
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,
}

impl Default for ProviderDefaults {
    fn default() -> Self {
        Self {
            proxy: None,
            enable_multiplexing: default_enable_multiplexing(),
            timeout_secs: default_timeout_secs(),
            retry_max_times: default_retry_max_times(),
        }
    }
}

/// All provider configurations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    /// Global defaults for providers (overridden per provider if set).
    #[serde(default)]
    pub defaults: ProviderDefaults,

    /// Live quotation provider.
    #[serde(default)]
    pub zenquotes: ZenQuotesConfig,

    /// Primary image provider.
    #[serde(default)]
    pub unsplash: UnsplashConfig,

    /// Secondary image provider.
    #[serde(default)]
    pub pexels: PexelsConfig,
}

fn default_enable_multiplexing() -> bool {
    false
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_retry_max_times() -> usize {
    0
}

/// Accepts credentials that figment parsed as numbers (all-digit keys from env).
fn deserialize_credential_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom(
            "expected a string or a number for a provider credential",
        )),
    }
}
