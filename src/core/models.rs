use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/* ----- SEARCH (shared by search/, session/, stores/) ----- */

/// One asset returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Stable identifier (e.g. `bitcoin`); used for navigation and de-duplication.
    pub id: String,
    /// Display name (e.g. `Bitcoin`).
    pub name: String,
    /// Ticker symbol (e.g. `BTC`).
    pub symbol: String,
    /// Market-cap rank, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Thumbnail URL, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/* ----- NEWS (shared by news/, feed/, trending/, analytics/, stores/) ----- */

/// A news article. `url` is its natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline.
    pub title: String,
    /// Teaser text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical link to the article.
    pub url: String,
    /// Publisher name; analytics reports a missing source as `Unknown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Publication time.
    pub published_at: DateTime<Utc>,
    /// Feed category (e.g. `bitcoin`, `defi`).
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// A category and the number of articles the server holds for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category name.
    pub name: String,
    /// Article count reported by the server.
    #[serde(default)]
    pub count: u64,
}
