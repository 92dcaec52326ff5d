#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use coinfeed_rs::core::ServiceFuture;
use coinfeed_rs::{
    Article, CategoryCount, CfClient, CfError, NewsPage, NewsQuery, NewsService, SearchResult,
    SearchService,
};
use httpmock::MockServer;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client pointed at `server`'s `/api/v1/`, without retries.
pub fn client_for(server: &MockServer) -> CfClient {
    CfClient::builder()
        .base_api(Url::parse(&format!("{}/api/v1/", server.base_url())).unwrap())
        .retry_enabled(false)
        .build()
        .unwrap()
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap()
}

pub fn asset(id: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        name: format!("{id} coin"),
        symbol: id.to_uppercase(),
        rank: None,
        image_url: None,
    }
}

pub fn article(title: &str, published_at: DateTime<Utc>) -> Article {
    Article {
        title: title.to_string(),
        description: None,
        url: format!("https://news.example/{}", title.to_lowercase().replace(' ', "-")),
        source: None,
        published_at,
        category: "general".to_string(),
    }
}

pub fn article_from(title: &str, source: Option<&str>, hours_ago: i64) -> Article {
    Article {
        source: source.map(str::to_string),
        ..article(title, fixed_now() - TimeDelta::hours(hours_ago))
    }
}

/* ---------------- Fake search service ---------------- */

/// Answers every query with three assets `{query}-1..3` after a per-query delay.
#[derive(Debug, Default)]
pub struct FakeSearch {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    empty: HashSet<String>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, query: &str, d: Duration) -> Self {
        self.delays.insert(query.to_string(), d);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn empty(mut self, query: &str) -> Self {
        self.empty.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn results_for(query: &str) -> Vec<SearchResult> {
    (1..=3).map(|i| asset(&format!("{query}-{i}"))).collect()
}

impl SearchService for FakeSearch {
    fn search_assets<'a>(&'a self, query: &'a str) -> ServiceFuture<'a, Vec<SearchResult>> {
        self.calls.lock().unwrap().push(query.to_string());
        let delay = self
            .delays
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(10));
        let fail = self.failing.contains(query);
        let empty = self.empty.contains(query);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if fail {
                return Err(CfError::ServerError {
                    status: 500,
                    url: format!("/api/v1/search/{query}"),
                });
            }
            if empty {
                return Ok(Vec::new());
            }
            Ok(results_for(query))
        })
    }
}

/* ---------------- Fake news service ---------------- */

#[derive(Debug, Default)]
pub struct FakeNews {
    pub latest: Vec<Article>,
    pub categories: Vec<CategoryCount>,
    pub fail_categories: bool,
    pub latest_limits: Mutex<Vec<u32>>,
}

impl NewsService for FakeNews {
    fn latest_news(&self, limit: u32) -> ServiceFuture<'_, Vec<Article>> {
        self.latest_limits.lock().unwrap().push(limit);
        let items: Vec<Article> = self.latest.iter().take(limit as usize).cloned().collect();
        Box::pin(async move { Ok(items) })
    }

    fn news_page<'a>(&'a self, query: &'a NewsQuery) -> ServiceFuture<'a, NewsPage> {
        let limit = query.limit.unwrap_or(10);
        let page = query.page.unwrap_or(1);
        let start = ((page - 1) * limit) as usize;
        let articles = self
            .latest
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        let total = self.latest.len() as u64;
        Box::pin(async move {
            Ok(NewsPage {
                articles,
                page,
                limit,
                total: Some(total),
            })
        })
    }

    fn news_categories(&self) -> ServiceFuture<'_, Vec<CategoryCount>> {
        if self.fail_categories {
            return Box::pin(async {
                Err(CfError::RateLimited {
                    url: "/api/v1/news/categories".into(),
                })
            });
        }
        let cats = self.categories.clone();
        Box::pin(async move { Ok(cats) })
    }
}

/* ---------------- Wire bodies ---------------- */

pub fn search_body(ids: &[&str]) -> String {
    let results: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("{id} coin"),
                "symbol": id.to_uppercase(),
                "rank": 1,
                "imageUrl": format!("https://img.example/{id}.png")
            })
        })
        .collect();
    serde_json::json!({ "data": { "results": results } }).to_string()
}

pub fn article_json(title: &str, published_at: &str, source: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": format!("{title} description"),
        "url": format!("https://news.example/{}", title.to_lowercase().replace(' ', "-")),
        "source": source,
        "publishedAt": published_at,
        "category": "bitcoin"
    })
}

pub fn ok_envelope(data: serde_json::Value) -> String {
    serde_json::json!({ "success": true, "data": data }).to_string()
}
