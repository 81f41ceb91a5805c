use backon::{ExponentialBuilder, Retryable};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::error::{IsRetryable, ProviderError};
use crate::utils::logging::with_pretty_json_debug;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// Retry policy for upstream 5xx and connection failures. `max_times = 0` disables retries.
pub(crate) fn retry_policy(max_times: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_millis(300))
        .with_max_times(max_times)
        .with_jitter()
}

/// GETs `url` and decodes a JSON body into `T`.
///
/// Non-2xx statuses become `ProviderError::UpstreamStatus` with a body preview; only
/// retryable failures are retried under `policy`.
pub(crate) async fn get_json_with_retry<T>(
    provider: &'static str,
    client: &reqwest::Client,
    url: &Url,
    headers: Option<HeaderMap>,
    policy: ExponentialBuilder,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let value = (|| {
        let client = client.clone();
        let url = url.clone();
        let headers = headers.clone();

        async move {
            let mut request = client.get(url.clone());
            if let Some(headers) = headers {
                request = request.headers(headers);
            }

            let resp = request.send().await?;
            let status = resp.status();
            let bytes = resp.bytes().await?;

            if !status.is_success() {
                let raw_body = String::from_utf8_lossy(&bytes);
                let body_preview = format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS);

                tracing::debug!(
                    provider,
                    %status,
                    url = %url,
                    body = %body_preview,
                    "[{provider}] Upstream returned non-success status"
                );

                return Err(ProviderError::UpstreamStatus {
                    status,
                    body: body_preview,
                });
            }

            let value: Value = serde_json::from_slice(&bytes)?;
            Ok::<Value, ProviderError>(value)
        }
    })
    .retry(policy)
    .when(ProviderError::is_retryable)
    .notify(|err, dur| {
        tracing::debug!(provider, error = %err, "[{provider}] Retrying upstream call in {dur:?}");
    })
    .await?;

    with_pretty_json_debug(&value, |pretty| {
        tracing::debug!(provider, body = %pretty, "[{provider}] Upstream payload");
    });

    Ok(serde_json::from_value(value)?)
}
