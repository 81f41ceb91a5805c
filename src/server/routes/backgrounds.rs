use crate::error::LuminousError;
use crate::server::router::LuminousState;
use crate::server::routes::invalid_body;
use crate::types::{BackgroundPhoto, ProviderConfig};

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use url::Url;

pub fn router() -> Router<LuminousState> {
    Router::new()
        .route(
            "/backgrounds/random",
            get(random_background).post(random_background_with_settings),
        )
        .route("/backgrounds/download", post(track_download))
}

#[derive(Debug, Default, Deserialize)]
pub struct TermsQuery {
    /// Comma-separated search terms.
    pub terms: Option<String>,
}

/// Caller-supplied settings; absent fields fall back to the configured ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundRequest {
    #[serde(default)]
    pub image_services: Option<Vec<ProviderConfig>>,
    #[serde(default)]
    pub search_terms: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub download_location: Option<String>,
}

/// GET /backgrounds/random?terms=a,b
pub async fn random_background(
    State(state): State<LuminousState>,
    Query(query): Query<TermsQuery>,
) -> Json<BackgroundPhoto> {
    let terms: Vec<String> = match query.terms.as_deref() {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => state.backgrounds.search_terms.clone(),
    };

    let photo = state
        .resolver
        .resolve_background(&state.backgrounds.image_services, &terms)
        .await;
    Json(photo)
}

/// POST /backgrounds/random
pub async fn random_background_with_settings(
    State(state): State<LuminousState>,
    payload: Result<Json<BackgroundRequest>, JsonRejection>,
) -> Result<Json<BackgroundPhoto>, LuminousError> {
    let Json(request) = payload.map_err(|e| invalid_body(&e))?;

    let services = request
        .image_services
        .as_deref()
        .unwrap_or(state.backgrounds.image_services.as_slice());
    let terms = request
        .search_terms
        .as_deref()
        .unwrap_or(state.backgrounds.search_terms.as_slice());

    Ok(Json(state.resolver.resolve_background(services, terms).await))
}

/// POST /backgrounds/download
///
/// Accepts right away; the tracking ping runs in the background and its outcome is only logged.
pub async fn track_download(
    State(state): State<LuminousState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<StatusCode, LuminousError> {
    let Json(request) = payload.map_err(|e| invalid_body(&e))?;

    let raw = request
        .download_location
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| {
            LuminousError::bad_request("MISSING_DOWNLOAD_LOCATION", "downloadLocation is required")
        })?;
    let location = Url::parse(raw.trim()).map_err(|_| {
        LuminousError::bad_request("INVALID_DOWNLOAD_LOCATION", "downloadLocation is not a URL")
    })?;
    if !state.providers.unsplash.accepts_download_location(&location) {
        return Err(LuminousError::bad_request(
            "INVALID_DOWNLOAD_LOCATION",
            "downloadLocation must point at the Unsplash API",
        ));
    }

    let unsplash = state.providers.unsplash.clone();
    tokio::spawn(async move {
        unsplash.track_download(location).await;
    });

    Ok(StatusCode::ACCEPTED)
}
