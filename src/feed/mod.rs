//! The news feed: listing, trending and analytics over a [`NewsService`].
//!
//! Caching happens below this layer, in the client's response cache, so repeated calls within
//! the TTL do not reach the network. Errors are passed through unchanged; use
//! [`CfError::user_message`](crate::CfError::user_message) to display them.

use std::sync::Arc;

use crate::analytics::{self, NewsAnalytics};
use crate::core::clock::{Clock, SystemClock};
use crate::core::models::{Article, CategoryCount};
use crate::core::services::NewsService;
use crate::news::{NewsPage, NewsQuery};
use crate::trending::{self, DEFAULT_TRENDING_KEYWORDS, TRENDING_POOL_SIZE};
use crate::{CfClient, CfError};

/// Number of latest articles sampled for source and recency analytics.
pub const ANALYTICS_POOL_SIZE: u32 = 100;

/// Feed tuning.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Keywords the trending ranker matches against.
    pub keywords: Vec<String>,
    /// How many of the latest articles are trending candidates.
    pub trending_pool: u32,
    /// How many of the latest articles analytics samples.
    pub analytics_pool: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_TRENDING_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
            trending_pool: TRENDING_POOL_SIZE,
            analytics_pool: ANALYTICS_POOL_SIZE,
        }
    }
}

/// News listing plus the derived trending and analytics views.
#[derive(Debug, Clone)]
pub struct NewsFeed<S = CfClient> {
    service: S,
    clock: Arc<dyn Clock>,
    config: FeedConfig,
}

impl NewsFeed<CfClient> {
    /// A feed over `client`, sharing its clock.
    #[must_use]
    pub fn from_client(client: CfClient) -> Self {
        let clock = client.clock();
        Self::new(client, clock)
    }
}

impl<S: NewsService> NewsFeed<S> {
    /// A feed over `service` with the default configuration.
    pub fn new(service: S, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(service, clock, FeedConfig::default())
    }

    /// A feed over `service` reading the system clock.
    pub fn with_system_clock(service: S) -> Self {
        Self::new(service, Arc::new(SystemClock))
    }

    /// A feed over `service` with `config`.
    pub fn with_config(service: S, clock: Arc<dyn Clock>, config: FeedConfig) -> Self {
        Self {
            service,
            clock,
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// One page of the listing.
    ///
    /// # Errors
    ///
    /// Propagates the service error.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn page(&self, query: &NewsQuery) -> Result<NewsPage, CfError> {
        self.service.news_page(query).await
    }

    /// The `limit` most recent articles.
    ///
    /// # Errors
    ///
    /// Propagates the service error.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn latest(&self, limit: u32) -> Result<Vec<Article>, CfError> {
        self.service.latest_news(limit).await
    }

    /// Every category with its article count.
    ///
    /// # Errors
    ///
    /// Propagates the service error.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn categories(&self) -> Result<Vec<CategoryCount>, CfError> {
        self.service.news_categories().await
    }

    /// The `limit` highest-scoring articles among the latest `trending_pool`.
    ///
    /// # Errors
    ///
    /// Propagates the service error.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn trending(&self, limit: usize) -> Result<Vec<Article>, CfError> {
        let pool = self.service.latest_news(self.config.trending_pool).await?;
        tracing::debug!(candidates = pool.len(), limit, "ranking trending articles");
        Ok(trending::rank(
            pool,
            &self.config.keywords,
            limit,
            self.clock.now(),
        ))
    }

    /// Totals, recency, top sources and category shares.
    ///
    /// Categories and the article sample are fetched concurrently; either failing fails the
    /// whole call.
    ///
    /// # Errors
    ///
    /// Propagates the first service error.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn analytics(&self) -> Result<NewsAnalytics, CfError> {
        let (categories, recent) = futures::future::try_join(
            self.service.news_categories(),
            self.service.latest_news(self.config.analytics_pool),
        )
        .await?;
        Ok(analytics::summarize(&categories, &recent, self.clock.now()))
    }
}
