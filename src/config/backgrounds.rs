use serde::{Deserialize, Serialize};

use crate::providers::policy;
use crate::types::{ImageService, ProviderConfig};

pub const DEFAULT_SEARCH_TERMS: [&str; 5] = [
    "abstract",
    "gradient",
    "dark wallpaper",
    "nature minimal",
    "cosmic",
];

/// Image service selection and search terms for background resolution.
///
/// Passed into the resolver per call. The settings operations below edit this value
/// only; nothing is held process-wide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackgroundSettings {
    /// TOML: `backgrounds.image_services` (array of `{ name, enabled, priority }`).
    /// Default: Unsplash priority 1, Pexels priority 2, both enabled.
    #[serde(default = "default_image_services", alias = "imageServices")]
    pub image_services: Vec<ProviderConfig>,

    /// TOML: `backgrounds.search_terms`.
    #[serde(default = "default_search_terms", alias = "searchTerms")]
    pub search_terms: Vec<String>,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            image_services: default_image_services(),
            search_terms: default_search_terms(),
        }
    }
}

impl BackgroundSettings {
    /// Trims and lowercases `term`; empty or already-present terms leave the settings unchanged.
    pub fn add_search_term(&mut self, term: &str) -> bool {
        let normalized = term.trim().to_lowercase();
        if normalized.is_empty() || self.search_terms.contains(&normalized) {
            return false;
        }
        self.search_terms.push(normalized);
        true
    }

    pub fn remove_search_term(&mut self, term: &str) {
        self.search_terms.retain(|t| t != term);
    }

    /// Partially updates one service; unknown services are appended with priority
    /// after the current maximum.
    pub fn update_service(
        &mut self,
        service: ImageService,
        enabled: Option<bool>,
        priority: Option<u32>,
    ) {
        if let Some(cfg) = self.image_services.iter_mut().find(|c| c.name == service) {
            if let Some(enabled) = enabled {
                cfg.enabled = enabled;
            }
            if let Some(priority) = priority {
                cfg.priority = priority.max(1);
            }
            return;
        }

        let next = self
            .image_services
            .iter()
            .map(|c| c.priority)
            .max()
            .unwrap_or(0)
            + 1;
        self.image_services.push(ProviderConfig {
            name: service,
            enabled: enabled.unwrap_or(true),
            priority: priority.unwrap_or(next).max(1),
        });
    }

    /// Assigns priorities `1..=N` following `sequence`.
    pub fn reorder_services(&mut self, sequence: &[ImageService]) {
        self.image_services = policy::reorder(&self.image_services, sequence);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Search terms to draw from; the built-in set when none are configured.
    pub fn effective_search_terms(&self) -> Vec<String> {
        effective_search_terms(&self.search_terms)
    }
}

pub(crate) fn effective_search_terms(terms: &[String]) -> Vec<String> {
    let cleaned: Vec<String> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        default_search_terms()
    } else {
        cleaned
    }
}

fn default_image_services() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: ImageService::Pexels,
            enabled: true,
            priority: 2,
        },
        ProviderConfig {
            name: ImageService::Unsplash,
            enabled: true,
            priority: 1,
        },
    ]
}

fn default_search_terms() -> Vec<String> {
    DEFAULT_SEARCH_TERMS.iter().map(|s| (*s).to_string()).collect()
}
