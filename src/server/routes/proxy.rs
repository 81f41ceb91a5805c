use crate::error::{LuminousError, ProviderError};
use crate::server::router::LuminousState;

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::warn;
use url::Url;

const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

pub fn router() -> Router<LuminousState> {
    Router::new().route("/proxy-image", get(proxy_image))
}

#[derive(Debug, Default, Deserialize)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

/// GET /proxy-image?url=<image url>
///
/// Relays the image bytes and content type so the browser can draw them onto a canvas
/// without cross-origin taint.
pub async fn proxy_image(
    State(state): State<LuminousState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, LuminousError> {
    let raw = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| LuminousError::bad_request("MISSING_URL", "Missing url param"))?;
    let url = Url::parse(raw.trim())
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .ok_or_else(|| LuminousError::bad_request("INVALID_URL", "url must be an http(s) URL"))?;

    let resp = state.providers.relay.get(url.clone()).send().await.map_err(|e| {
        warn!(url = %url, error = %e, "Image relay request failed");
        LuminousError::ReqwestError(e)
    })?;

    let status = resp.status();
    if !status.is_success() {
        warn!(url = %url, %status, "Image relay upstream returned non-success status");
        return Err(ProviderError::UpstreamStatus {
            status,
            body: String::new(),
        }
        .into());
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_IMAGE_CONTENT_TYPE));
    let bytes = resp.bytes().await?;

    Ok(([(CONTENT_TYPE, content_type)], bytes).into_response())
}
