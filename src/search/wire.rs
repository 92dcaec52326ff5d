use serde::Deserialize;

use crate::core::models::SearchResult;

/* ------------- Minimal serde mapping of /search/{query} ------------- */

#[derive(Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(default)]
    pub(crate) data: Option<SearchData>,
}

#[derive(Deserialize)]
pub(crate) struct SearchData {
    #[serde(default)]
    pub(crate) results: Option<Vec<SearchResult>>,
}
