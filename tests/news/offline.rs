use chrono::{TimeZone, Utc};
use httpmock::Method::GET;
use coinfeed_rs::{CfError, ErrorKind, NewsBuilder, NewsQuery, latest_news, news_categories};

use crate::common::{article_json, client_for, ok_envelope, setup_server};

#[tokio::test]
async fn latest_news_parses_articles() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/news/latest")
            .query_param("limit", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(ok_envelope(serde_json::json!([
                article_json("Bitcoin ETF inflows", "2024-03-14T09:30:00Z", "CoinDesk"),
                article_json("Solana outage", "2024-03-13T22:00:00Z", "Decrypt"),
            ])));
    });

    let articles = latest_news(&client_for(&server), 2).await.unwrap();
    mock.assert();

    assert_eq!(articles.len(), 2);
    let first = &articles[0];
    assert_eq!(first.title, "Bitcoin ETF inflows");
    assert_eq!(first.source.as_deref(), Some("CoinDesk"));
    assert_eq!(first.category, "bitcoin");
    assert_eq!(
        first.published_at,
        Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
    );
    assert_eq!(
        first.description.as_deref(),
        Some("Bitcoin ETF inflows description")
    );
}

#[tokio::test]
async fn article_without_optional_fields_gets_defaults() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/news/latest");
        then.status(200).body(ok_envelope(serde_json::json!([{
            "title": "Bare",
            "url": "https://news.example/bare",
            "publishedAt": "2024-03-14T00:00:00Z"
        }])));
    });

    let articles = NewsBuilder::new(&client_for(&server)).latest().await.unwrap();
    assert_eq!(articles[0].category, "general");
    assert_eq!(articles[0].source, None);
    assert_eq!(articles[0].description, None);
}

#[tokio::test]
async fn page_sends_parameters_and_reads_pagination() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/news")
            .query_param("page", "2")
            .query_param("limit", "1")
            .query_param("category", "defi");
        then.status(200).body(ok_envelope(serde_json::json!({
            "articles": [article_json("Aave v4", "2024-03-14T08:00:00Z", "The Block")],
            "pagination": { "page": 2, "limit": 1, "total": 7 }
        })));
    });

    let page = NewsBuilder::new(&client_for(&server))
        .page(2)
        .limit(1)
        .category("defi")
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 1);
    assert_eq!(page.total, Some(7));
    assert_eq!(page.articles[0].title, "Aave v4");
}

#[tokio::test]
async fn page_without_pagination_falls_back_to_request() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/news");
        then.status(200).body(ok_envelope(serde_json::json!({
            "articles": [
                article_json("One", "2024-03-14T08:00:00Z", "A"),
                article_json("Two", "2024-03-14T07:00:00Z", "B")
            ]
        })));
    });

    let page = NewsBuilder::new(&client_for(&server))
        .query(NewsQuery {
            page: Some(3),
            ..NewsQuery::default()
        })
        .fetch()
        .await
        .unwrap();
    assert_eq!(page.page, 3);
    assert_eq!(page.limit, 2);
    assert_eq!(page.total, None);
}

#[tokio::test]
async fn categories_parse_counts() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/news/categories");
        then.status(200).body(ok_envelope(serde_json::json!([
            { "name": "bitcoin", "count": 30 },
            { "name": "defi", "count": 10 },
            { "name": "nft" }
        ])));
    });

    let cats = news_categories(&client_for(&server)).await.unwrap();
    let pairs: Vec<(&str, u64)> = cats.iter().map(|c| (c.name.as_str(), c.count)).collect();
    assert_eq!(pairs, vec![("bitcoin", 30), ("defi", 10), ("nft", 0)]);
}

#[tokio::test]
async fn unsuccessful_envelope_is_an_api_error() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/news/categories");
        then.status(200)
            .body(r#"{"success":false,"error":"category index rebuilding"}"#);
    });

    let err = news_categories(&client_for(&server)).await.unwrap_err();
    match &err {
        CfError::Api { endpoint, message } => {
            assert_eq!(endpoint, "news_categories");
            assert_eq!(message, "category index rebuilding");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn successful_envelope_without_data_is_missing_data() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/news/latest");
        then.status(200).body(r#"{"success":true}"#);
    });

    let err = latest_news(&client_for(&server), 5).await.unwrap_err();
    assert!(
        matches!(&err, CfError::MissingData { endpoint } if endpoint == "news_latest"),
        "got {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn malformed_article_is_a_json_error() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/news/latest");
        then.status(200)
            .body(ok_envelope(serde_json::json!([{ "title": "no url or date" }])));
    });

    let err = latest_news(&client_for(&server), 5).await.unwrap_err();
    assert!(matches!(err, CfError::Json(_)), "got {err:?}");
}
