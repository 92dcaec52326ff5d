//! Keyword + recency ranking for the "trending" view.
//!
//! `score = keyword_matches + recency_boost`, where `keyword_matches` counts the distinct
//! keywords (case-insensitive) occurring anywhere in the title or description, and
//! `recency_boost` decays linearly from 1.0 for a just-published article to 0.0 at
//! [`TRENDING_WINDOW_HOURS`] and beyond.
//!
//! Scores live only in the ranking's working set; the returned articles are the inputs,
//! untouched.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::core::models::Article;

/// Width of the recency window, in hours.
pub const TRENDING_WINDOW_HOURS: f64 = 24.0;

/// Number of latest articles the feed pulls as trending candidates.
///
/// Older articles are never considered, whatever the size of the corpus.
pub const TRENDING_POOL_SIZE: u32 = 50;

/// Keywords the feed ranks against unless configured otherwise.
pub const DEFAULT_TRENDING_KEYWORDS: &[&str] = &[
    "bitcoin",
    "btc",
    "ethereum",
    "eth",
    "crypto",
    "blockchain",
    "defi",
    "nft",
    "etf",
    "sec",
    "regulation",
    "surge",
    "rally",
    "crash",
    "breakout",
    "all-time high",
    "record",
];

/// Lower-cased, de-duplicated, non-empty keywords.
fn normalize_keywords<K: AsRef<str>>(keywords: &[K]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for k in keywords {
        let k = k.as_ref().trim().to_lowercase();
        if !k.is_empty() && !out.contains(&k) {
            out.push(k);
        }
    }
    out
}

/// Number of distinct `keywords` (already normalized) found in the article text.
fn keyword_matches(article: &Article, keywords: &[String]) -> usize {
    let mut text = article.title.to_lowercase();
    if let Some(d) = &article.description {
        text.push(' ');
        text.push_str(&d.to_lowercase());
    }
    keywords.iter().filter(|k| text.contains(k.as_str())).count()
}

/// Linear freshness bonus in `[0, 1]`.
///
/// Articles dated in the future count as just published.
#[must_use]
pub fn recency_boost(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let age_hours = (now - published_at).num_milliseconds() as f64 / 3_600_000.0;
    ((TRENDING_WINDOW_HOURS - age_hours) / TRENDING_WINDOW_HOURS).clamp(0.0, 1.0)
}

/// The trending score of one article.
#[must_use]
pub fn trending_score<K: AsRef<str>>(article: &Article, keywords: &[K], now: DateTime<Utc>) -> f64 {
    let keywords = normalize_keywords(keywords);
    score_normalized(article, &keywords, now)
}

#[allow(clippy::cast_precision_loss)]
fn score_normalized(article: &Article, keywords: &[String], now: DateTime<Utc>) -> f64 {
    keyword_matches(article, keywords) as f64 + recency_boost(article.published_at, now)
}

/// Orders `candidates` by descending trending score and keeps the first `limit`.
///
/// Equal scores keep their input order: the comparison falls back to the original position
/// explicitly, so the result does not depend on the sort being stable.
#[must_use]
pub fn rank<K: AsRef<str>>(
    candidates: Vec<Article>,
    keywords: &[K],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let keywords = normalize_keywords(keywords);

    let mut order: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(i, a)| (i, score_normalized(a, &keywords, now)))
        .collect();
    order.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    order.truncate(limit);

    let mut slots: Vec<Option<Article>> = candidates.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|(i, _)| slots[i].take())
        .collect()
}
