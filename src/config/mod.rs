mod backgrounds;
mod basic;
mod providers;

pub use backgrounds::{BackgroundSettings, DEFAULT_SEARCH_TERMS};
pub(crate) use backgrounds::effective_search_terms;
pub use basic::BasicConfig;
pub use providers::{
    PexelsConfig, PexelsResolvedConfig, ProviderDefaults, ProvidersConfig, UnsplashConfig,
    UnsplashResolvedConfig, ZenQuotesConfig, ZenQuotesResolvedConfig,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Provider and upstream settings (see `providers` table in config.toml).
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Default image service selection and search terms for background resolution.
    #[serde(default)]
    pub backgrounds: BackgroundSettings,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file, and the
    /// provider credential environment variables.
    ///
    /// `UNSPLASH_ACCESS_KEY` and `PEXELS_API_KEY` win over the TOML values so keys can
    /// stay out of files on disk.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(
            Env::raw()
                .only(&["UNSPLASH_ACCESS_KEY", "PEXELS_API_KEY"])
                .map(|key| {
                    if key.as_str().eq_ignore_ascii_case("UNSPLASH_ACCESS_KEY") {
                        "providers.unsplash.access_key".into()
                    } else {
                        "providers.pexels.api_key".into()
                    }
                })
                .split("."),
        )
    }

    /// Loads configuration by merging defaults, `config.toml` if present, and env keys.
    pub fn load() -> Self {
        Self::figment().extract().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml + env): {err}")
        })
    }

    pub fn zenquotes(&self) -> ZenQuotesResolvedConfig {
        self.providers.zenquotes.resolve(&self.providers.defaults)
    }

    pub fn unsplash(&self) -> UnsplashResolvedConfig {
        self.providers.unsplash.resolve(&self.providers.defaults)
    }

    pub fn pexels(&self) -> PexelsResolvedConfig {
        self.providers.pexels.resolve(&self.providers.defaults)
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
