use serde::Deserialize;

use crate::core::models::Article;

#[derive(Deserialize)]
pub(crate) struct NewsListData {
    #[serde(default)]
    pub(crate) articles: Vec<Article>,
    #[serde(default)]
    pub(crate) pagination: Option<Pagination>,
}

#[derive(Deserialize)]
pub(crate) struct Pagination {
    pub(crate) page: Option<u32>,
    pub(crate) limit: Option<u32>,
    pub(crate) total: Option<u64>,
}
