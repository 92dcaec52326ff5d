use serde::Serialize;

use crate::core::models::Article;

/// One page of the paginated news listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsPage {
    /// Articles on this page, in server order.
    pub articles: Vec<Article>,
    /// One-based page number.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total articles matching the query, when the server reports it.
    pub total: Option<u64>,
}

/// Parameters of a paginated news request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsQuery {
    /// One-based page number; the server default applies when `None`.
    pub page: Option<u32>,
    /// Page size; the server default applies when `None`.
    pub limit: Option<u32>,
    /// Restrict to one category.
    pub category: Option<String>,
}
