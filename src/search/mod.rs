mod wire;

use crate::cache::cache_key;
use crate::core::client::{CacheMode, RetryConfig};
use crate::core::models::SearchResult;
use crate::core::net;
use crate::{CfClient, CfError};

fn parse_search_body(body: &str) -> Result<Vec<SearchResult>, CfError> {
    let env: wire::SearchEnvelope = serde_json::from_str(body).map_err(CfError::Json)?;
    Ok(env.data.and_then(|d| d.results).unwrap_or_default())
}

/* ---------------- Public API ---------------- */

/// Searches for assets matching a query.
///
/// # Errors
///
/// Returns `CfError` if the network request fails or the response cannot be parsed.
pub async fn search(client: &CfClient, query: &str) -> Result<Vec<SearchResult>, CfError> {
    SearchBuilder::new(client, query).fetch().await
}

/// A builder for asset searches against `GET /search/{query}`.
#[derive(Debug)]
pub struct SearchBuilder {
    client: CfClient,
    query: String,
    limit: Option<usize>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl SearchBuilder {
    /// Creates a new `SearchBuilder` for a given search query.
    pub fn new(client: &CfClient, query: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            query: query.into(),
            limit: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Keeps at most `n` results, in server order.
    #[must_use]
    pub const fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Executes the search request.
    ///
    /// A well-formed body without a `data.results` member yields an empty list.
    ///
    /// # Errors
    ///
    /// This method will return an error if the network request fails, the API returns a
    /// non-successful status code, or the response body is not valid JSON.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err, fields(query = %self.query)))]
    pub async fn fetch(self) -> Result<Vec<SearchResult>, CfError> {
        let url = net::endpoint_url(&self.client, &["search", self.query.as_str()])?;
        let key = cache_key(&format!("search/{}", self.query), []);

        let mut results = net::fetch_parsed(
            &self.client,
            url,
            "search",
            &key,
            self.cache_mode,
            self.retry_override.as_ref(),
            parse_search_body,
        )
        .await?;

        if let Some(n) = self.limit {
            results.truncate(n);
        }
        Ok(results)
    }
}
