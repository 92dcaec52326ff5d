//! Summary statistics over the news corpus.
//!
//! Percentages are safe against an empty corpus: with no articles every share is `0.0`.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::core::models::{Article, CategoryCount};

/// How many sources [`summarize`] reports.
pub const TOP_SOURCES: usize = 5;

/// Label used for articles without a source.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A source and how many of the sampled articles it published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    /// Publisher name.
    pub name: String,
    /// Articles from this publisher.
    pub count: usize,
}

/// One category's share of the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Category name.
    pub name: String,
    /// Articles in this category.
    pub count: u64,
    /// `count / total * 100`, rounded to one decimal.
    pub percentage: f64,
}

impl CategoryShare {
    /// The percentage with exactly one decimal, e.g. `"25.0"`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// The analytics view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsAnalytics {
    /// Sum of every category's count.
    pub total_articles: u64,
    /// Sampled articles published in the trailing 24 hours.
    pub last_24h_count: usize,
    /// Most prolific sources among the sampled articles, highest first.
    pub top_sources: Vec<SourceCount>,
    /// Per-category counts and shares, in input order.
    pub category_distribution: Vec<CategoryShare>,
}

/// `count / total * 100` rounded to one decimal; `0.0` when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn share_pct(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Articles published within `[now - 24h, now]`.
#[must_use]
pub fn count_last_24h(articles: &[Article], now: DateTime<Utc>) -> usize {
    let since = now - TimeDelta::hours(24);
    articles
        .iter()
        .filter(|a| a.published_at >= since && a.published_at <= now)
        .count()
}

/// The `n` sources with most articles. Ties keep first-seen order.
#[must_use]
pub fn top_sources(articles: &[Article], n: usize) -> Vec<SourceCount> {
    let mut tallies: Vec<SourceCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for a in articles {
        let name = a
            .source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE);
        match index.get(name) {
            Some(&i) => tallies[i].count += 1,
            None => {
                index.insert(name, tallies.len());
                tallies.push(SourceCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    let mut ordered: Vec<(usize, SourceCount)> = tallies.into_iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| b.count.cmp(&a.count).then_with(|| ia.cmp(ib)));
    ordered.into_iter().take(n).map(|(_, s)| s).collect()
}

/// Derives the analytics view from category counts and a sample of recent articles.
#[must_use]
pub fn summarize(
    categories: &[CategoryCount],
    recent_articles: &[Article],
    now: DateTime<Utc>,
) -> NewsAnalytics {
    let total_articles: u64 = categories.iter().map(|c| c.count).sum();

    let category_distribution = categories
        .iter()
        .map(|c| CategoryShare {
            name: c.name.clone(),
            count: c.count,
            percentage: share_pct(c.count, total_articles),
        })
        .collect();

    NewsAnalytics {
        total_articles,
        last_24h_count: count_last_24h(recent_articles, now),
        top_sources: top_sources(recent_articles, TOP_SOURCES),
        category_distribution,
    }
}
