//! coinfeed-rs: the search and news-ranking engine behind a cryptocurrency information front end.
//!
//! - [`SearchSession`]: debounced, race-safe incremental search with keyboard navigation.
//! - [`RecentSearches`] and [`Bookmarks`]: bounded, de-duplicated persisted lists.
//! - [`TtlCache`]: keyed cache with expiry, used by [`CfClient`] for responses.
//! - [`NewsFeed`]: news listing plus [`trending`] ranking and [`analytics`] summaries.
//!
//! Storage, time and the remote services are injected ([`Storage`], [`Clock`],
//! [`SearchService`], [`NewsService`]) so every component can be tested in isolation.
//!
//! # Example
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use coinfeed_rs::{CfClient, MemoryStorage, NewsFeed, RecentSearches, SearchSession};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CfClient::builder()
//!     .cache_ttl(std::time::Duration::from_secs(300))
//!     .build()?;
//!
//! let feed = NewsFeed::from_client(client.clone());
//! for article in feed.trending(5).await? {
//!     println!("{}", article.title);
//! }
//!
//! let recent = RecentSearches::new(Arc::new(MemoryStorage::new()));
//! let session = SearchSession::new(client, recent);
//! let mut updates = session.subscribe();
//! session.set_query("bitcoin");
//! updates.changed().await?;
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod cache;
pub mod core;
pub mod feed;
pub mod news;
pub mod search;
pub mod session;
pub mod stores;
pub mod trending;

pub use analytics::{CategoryShare, NewsAnalytics, SourceCount};
pub use cache::{CacheEntry, TtlCache};
pub use crate::core::{
    Article, CacheMode, CategoryCount, CfClient, CfClientBuilder, CfError, Clock, ErrorKind,
    FileStorage, ManualClock, MemoryStorage, NewsService, RetryConfig, SearchResult,
    SearchService, Storage, StorageError, SystemClock,
};
pub use feed::{FeedConfig, NewsFeed};
pub use news::{NewsBuilder, NewsPage, NewsQuery, latest_news, news_categories};
pub use search::{SearchBuilder, search};
pub use session::{Debouncer, SearchSession, SearchStatus, SessionConfig, SessionSnapshot};
pub use stores::{Bookmarks, RecentSearches};

/// Installs a `fmt` subscriber driven by `RUST_LOG`, once. Later calls are no-ops.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing_for_tests() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
