// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use sitesearch::index::sink::IndexSink;
use sitesearch::index::tantivy_sink::TantivySink;
use sitesearch::presentation::routes;

fn test_server() -> (TestServer, TempDir) {
    let index_dir = TempDir::new().unwrap();
    let sink: Arc<dyn IndexSink> = Arc::new(TantivySink::open(index_dir.path()).unwrap());
    let server = TestServer::new(routes::routes(sink)).unwrap();
    (server, index_dir)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _index_dir) = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_ingest_then_search_roundtrip() {
    let (server, _index_dir) = test_server();

    let response = server
        .post("/v1/index")
        .json(&json!({
            "url": "http://example.com/article?ref=feed",
            "html": "<html><head><title>Coffee Guide</title>\
                <meta name=\"description\" content=\"All about coffee.\"></head>\
                <body><p>Brewing espresso at home.</p></body></html>"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "indexed");
    assert_eq!(body["url"], "http://example.com/article");

    let response = server
        .get("/v1/search")
        .add_query_param("q", "espresso")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["query"], "espresso");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["url"], "http://example.com/article");
    assert_eq!(results[0]["title"], "Coffee Guide");
    assert!(results[0]["snippet"].as_str().is_some());
}

#[tokio::test]
async fn test_ingest_rejects_missing_fields() {
    let (server, _index_dir) = test_server();

    let response = server
        .post("/v1/index")
        .json(&json!({ "url": "", "html": "" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_ingest_rejects_invalid_url() {
    let (server, _index_dir) = test_server();

    let response = server
        .post("/v1/index")
        .json(&json!({ "url": "not a url", "html": "<html></html>" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_search_rejects_empty_query() {
    let (server, _index_dir) = test_server();

    let response = server.get("/v1/search").add_query_param("q", "   ").await;
    assert_eq!(response.status_code(), 400);

    let response = server.get("/v1/search").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_search_reports_no_results() {
    let (server, _index_dir) = test_server();

    let response = server
        .get("/v1/search")
        .add_query_param("q", "unindexedterm")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "no results");
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_second_ingest_replaces_first() {
    let (server, _index_dir) = test_server();

    for html in [
        "<html><head><title>V1</title></head><body><p>first revision</p></body></html>",
        "<html><head><title>V2</title></head><body><p>second revision</p></body></html>",
    ] {
        let response = server
            .post("/v1/index")
            .json(&json!({ "url": "http://example.com/page", "html": html }))
            .await;
        response.assert_status_ok();
    }

    let response = server.get("/v1/search").add_query_param("q", "revision").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "V2");
}
