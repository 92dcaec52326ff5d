use url::Url;

use crate::core::client::{CacheMode, RetryConfig};
use crate::core::{CfClient, CfError};

/// Read the response body as text.
pub(crate) async fn get_text(resp: reqwest::Response, endpoint: &str) -> Result<String, CfError> {
    let text = resp.text().await?;
    tracing::trace!(endpoint, bytes = text.len(), "read response body");
    Ok(text)
}

/// GETs `url` and parses a successful body with `parse`.
///
/// With `CacheMode::Use` a live entry under `cache_key` short-circuits the request. A body is
/// written back only after it parsed, and never with `CacheMode::Bypass`, so a malformed reply
/// is not served again from the cache.
pub(crate) async fn fetch_parsed<T, F>(
    client: &CfClient,
    url: Url,
    endpoint: &str,
    cache_key: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
    parse: F,
) -> Result<T, CfError>
where
    F: Fn(&str) -> Result<T, CfError>,
{
    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(cache_key)
    {
        return parse(&body);
    }

    let req = client
        .http()
        .get(url.clone())
        .header("accept", "application/json");
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        let code = resp.status().as_u16();
        tracing::debug!(endpoint, status = code, "unsuccessful response");
        return Err(CfError::from_status(code, url.as_str()));
    }

    let body = get_text(resp, endpoint).await?;
    let parsed = parse(&body)?;
    if cache_mode != CacheMode::Bypass {
        client.cache_put(cache_key, &body);
    }
    Ok(parsed)
}

/// Appends `segments` to the base URL's path.
pub(crate) fn endpoint_url(client: &CfClient, segments: &[&str]) -> Result<Url, CfError> {
    let mut url = client.base_api().clone();
    url.path_segments_mut()
        .map_err(|()| CfError::Data("base URL cannot carry a path".into()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
