use std::future::Future;
use std::pin::Pin;

use crate::core::models::{Article, CategoryCount, SearchResult};
use crate::core::{CfClient, CfError};
use crate::news::{NewsBuilder, NewsPage, NewsQuery};
use crate::search::SearchBuilder;

/// A boxed, sendable future, as returned by the service traits.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CfError>> + Send + 'a>>;

/// A trait for services that can look up assets by free-text query.
///
/// [`SearchSession`](crate::SearchSession) is generic over it so it can run against a fake in
/// tests. It is implemented by [`CfClient`].
pub trait SearchService: Send + Sync {
    /// Asynchronously fetches the assets matching `query`.
    fn search_assets<'a>(&'a self, query: &'a str) -> ServiceFuture<'a, Vec<SearchResult>>;
}

/// A trait for services that can serve the news feed.
///
/// [`NewsFeed`](crate::NewsFeed) is generic over it. It is implemented by [`CfClient`].
pub trait NewsService: Send + Sync {
    /// The `limit` most recent articles, newest first.
    fn latest_news(&self, limit: u32) -> ServiceFuture<'_, Vec<Article>>;

    /// One page of the listing.
    fn news_page<'a>(&'a self, query: &'a NewsQuery) -> ServiceFuture<'a, NewsPage>;

    /// Every category with its article count.
    fn news_categories(&self) -> ServiceFuture<'_, Vec<CategoryCount>>;
}

impl SearchService for CfClient {
    fn search_assets<'a>(&'a self, query: &'a str) -> ServiceFuture<'a, Vec<SearchResult>> {
        Box::pin(SearchBuilder::new(self, query).fetch())
    }
}

impl NewsService for CfClient {
    fn latest_news(&self, limit: u32) -> ServiceFuture<'_, Vec<Article>> {
        Box::pin(NewsBuilder::new(self).limit(limit).latest())
    }

    fn news_page<'a>(&'a self, query: &'a NewsQuery) -> ServiceFuture<'a, NewsPage> {
        Box::pin(NewsBuilder::new(self).query(query.clone()).fetch())
    }

    fn news_categories(&self) -> ServiceFuture<'_, Vec<CategoryCount>> {
        Box::pin(NewsBuilder::new(self).categories())
    }
}

impl<T: SearchService + ?Sized> SearchService for std::sync::Arc<T> {
    fn search_assets<'a>(&'a self, query: &'a str) -> ServiceFuture<'a, Vec<SearchResult>> {
        (**self).search_assets(query)
    }
}

impl<T: NewsService + ?Sized> NewsService for std::sync::Arc<T> {
    fn latest_news(&self, limit: u32) -> ServiceFuture<'_, Vec<Article>> {
        (**self).latest_news(limit)
    }

    fn news_page<'a>(&'a self, query: &'a NewsQuery) -> ServiceFuture<'a, NewsPage> {
        (**self).news_page(query)
    }

    fn news_categories(&self) -> ServiceFuture<'_, Vec<CategoryCount>> {
        (**self).news_categories()
    }
}
