use serde::{Deserialize, Serialize};
use std::fmt;

/// Image services that can serve a background, in canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageService {
    Unsplash,
    Pexels,
}

impl ImageService {
    pub const ALL: [ImageService; 2] = [ImageService::Unsplash, ImageService::Pexels];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageService::Unsplash => "unsplash",
            ImageService::Pexels => "pexels",
        }
    }
}

impl fmt::Display for ImageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: ImageService,
    pub enabled: bool,
    pub priority: u32,
}

/// Which tier served a background. UI attribution text is derived from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundOrigin {
    Unsplash,
    Pexels,
    Static,
}

impl From<ImageService> for BackgroundOrigin {
    fn from(service: ImageService) -> Self {
        match service {
            ImageService::Unsplash => BackgroundOrigin::Unsplash,
            ImageService::Pexels => BackgroundOrigin::Pexels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundPhoto {
    /// Provider-assigned id, or `"fallback"` for the static set.
    pub id: String,
    pub url: String,
    pub attribution_name: String,
    pub attribution_profile_url: String,
    pub source_page_url: String,
    pub origin: BackgroundOrigin,
    /// Unsplash download-tracking endpoint for the photo, when the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
}
