use crate::{
    cache::cache_key,
    core::{
        CfClient, CfError,
        client::{CacheMode, RetryConfig},
        models::{Article, CategoryCount},
        net,
        wire::parse_envelope,
    },
    news::{NewsPage, NewsQuery, wire},
};

pub(super) async fn fetch_page(
    client: &CfClient,
    query: &NewsQuery,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<NewsPage, CfError> {
    let mut url = net::endpoint_url(client, &["news"])?;
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(p) = query.page {
        params.push(("page", p.to_string()));
    }
    if let Some(l) = query.limit {
        params.push(("limit", l.to_string()));
    }
    if let Some(c) = &query.category {
        params.push(("category", c.clone()));
    }
    if !params.is_empty() {
        let mut qp = url.query_pairs_mut();
        for (k, v) in &params {
            qp.append_pair(k, v);
        }
    }
    let key = cache_key("news", params);

    let data: wire::NewsListData = net::fetch_parsed(
        client,
        url,
        "news",
        &key,
        cache_mode,
        retry_override,
        |body| parse_envelope(body, "news"),
    )
    .await?;

    let pagination = data.pagination;
    Ok(NewsPage {
        page: pagination
            .as_ref()
            .and_then(|p| p.page)
            .or(query.page)
            .unwrap_or(1),
        limit: pagination
            .as_ref()
            .and_then(|p| p.limit)
            .or(query.limit)
            .unwrap_or_else(|| u32::try_from(data.articles.len()).unwrap_or(u32::MAX)),
        total: pagination.and_then(|p| p.total),
        articles: data.articles,
    })
}

pub(super) async fn fetch_latest(
    client: &CfClient,
    limit: Option<u32>,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Article>, CfError> {
    let mut url = net::endpoint_url(client, &["news", "latest"])?;
    let params: Vec<(&str, String)> = limit.map(|l| ("limit", l.to_string())).into_iter().collect();
    if let Some(l) = limit {
        url.query_pairs_mut().append_pair("limit", &l.to_string());
    }
    let key = cache_key("news/latest", params);

    net::fetch_parsed(
        client,
        url,
        "news_latest",
        &key,
        cache_mode,
        retry_override,
        |body| parse_envelope(body, "news_latest"),
    )
    .await
}

pub(super) async fn fetch_categories(
    client: &CfClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<CategoryCount>, CfError> {
    let url = net::endpoint_url(client, &["news", "categories"])?;
    let key = cache_key("news/categories", []);

    net::fetch_parsed(
        client,
        url,
        "news_categories",
        &key,
        cache_mode,
        retry_override,
        |body| parse_envelope(body, "news_categories"),
    )
    .await
}
