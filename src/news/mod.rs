mod api;
mod model;
mod wire;

pub use model::{NewsPage, NewsQuery};

use crate::{
    CfClient, CfError,
    core::client::{CacheMode, RetryConfig},
    core::models::{Article, CategoryCount},
};

/// Fetches the `limit` most recent articles.
///
/// # Errors
///
/// Returns a `CfError` if the request fails, the server reports `success: false`, or the
/// payload is missing or malformed.
pub async fn latest_news(client: &CfClient, limit: u32) -> Result<Vec<Article>, CfError> {
    NewsBuilder::new(client).limit(limit).latest().await
}

/// Fetches every category with its article count.
///
/// # Errors
///
/// Returns a `CfError` if the request fails, the server reports `success: false`, or the
/// payload is missing or malformed.
pub async fn news_categories(client: &CfClient) -> Result<Vec<CategoryCount>, CfError> {
    NewsBuilder::new(client).categories().await
}

/// A builder for the news endpoints.
///
/// `fetch` reads one page of `GET /news`, `latest` reads `GET /news/latest` and `categories`
/// reads `GET /news/categories`. Page and category only apply to `fetch`.
#[derive(Debug, Clone)]
pub struct NewsBuilder {
    client: CfClient,
    query: NewsQuery,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a new `NewsBuilder`.
    pub fn new(client: &CfClient) -> Self {
        Self {
            client: client.clone(),
            query: NewsQuery::default(),
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

    /// Sets the one-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.query.page = Some(page);
        self
    }

    /// Sets the maximum number of articles to return.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Restricts the listing to one category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.query.category = Some(category.into());
        self
    }

    /// Replaces all listing parameters at once.
    #[must_use]
    pub fn query(mut self, query: NewsQuery) -> Self {
        self.query = query;
        self
    }

    /// Fetches one page of the news listing.
    ///
    /// # Errors
    ///
    /// Returns a `CfError` if the request fails, the server reports `success: false`, or the
    /// payload is missing or malformed.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn fetch(self) -> Result<NewsPage, CfError> {
        api::fetch_page(
            &self.client,
            &self.query,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Fetches the most recent articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns a `CfError` if the request fails, the server reports `success: false`, or the
    /// payload is missing or malformed.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn latest(self) -> Result<Vec<Article>, CfError> {
        api::fetch_latest(
            &self.client,
            self.query.limit,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Fetches every category with its article count.
    ///
    /// # Errors
    ///
    /// Returns a `CfError` if the request fails, the server reports `success: false`, or the
    /// payload is missing or malformed.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn categories(self) -> Result<Vec<CategoryCount>, CfError> {
        api::fetch_categories(&self.client, self.cache_mode, self.retry_override.as_ref()).await
    }
}
