// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitesearch::crawler::controller::{CrawlController, CrawlOptions};
use sitesearch::crawler::frontier::TraversalStrategy;
use sitesearch::engines::reqwest_engine::ReqwestEngine;
use sitesearch::index::sink::IndexSink;
use sitesearch::index::tantivy_sink::TantivySink;
use sitesearch::utils::robots::RobotsGate;

const USER_AGENT: &str = "sitesearch-bot/0.1";

fn html_page(body: &str) -> ResponseTemplate {
    // `set_body_string` forces a `text/plain` content-type that a later
    // `insert_header` does not override, so serve the bytes with an explicit
    // HTML content-type instead.
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

fn crawl_options(max_depth: u32, max_pages: usize) -> CrawlOptions {
    CrawlOptions {
        max_depth,
        max_pages,
        strategy: TraversalStrategy::DepthFirst,
        request_timeout: Duration::from_secs(5),
    }
}

async fn run_crawl(
    server: &MockServer,
    options: CrawlOptions,
) -> (
    sitesearch::crawler::controller::CrawlReport,
    Arc<dyn IndexSink>,
    usize,
    TempDir,
) {
    let seed_url = Url::parse(&server.uri()).unwrap();
    let index_dir = TempDir::new().unwrap();
    let sink: Arc<dyn IndexSink> = Arc::new(TantivySink::open(index_dir.path()).unwrap());

    let engine = ReqwestEngine::new(USER_AGENT).unwrap();
    let gate = RobotsGate::warm_up(&seed_url, USER_AGENT, Duration::from_secs(5)).await;

    let controller = CrawlController::new(engine, gate, sink.clone(), seed_url, options);
    let report = controller.run().await;
    let visited = controller.visited_count();
    (report, sink, visited, index_dir)
}

#[tokio::test]
async fn test_crawl_visits_in_domain_pages_within_depth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><head><title>Seed</title></head><body>
                <p>alpha content</p>
                <a href="/b">In-domain</a>
                <a href="http://external.invalid/c">External</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page(
            r#"<html><head><title>Child</title></head><body>
                <p>bravo content</p>
                <a href="/too-deep">Deeper</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    // Depth 2 must never be requested with max_depth = 1
    Mock::given(method("GET"))
        .and(path("/too-deep"))
        .respond_with(html_page("<html><body><p>charlie</p></body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let (report, sink, visited, _index_dir) = run_crawl(&server, crawl_options(1, 100)).await;

    assert_eq!(report.pages_indexed, 2);
    assert_eq!(report.pages_failed, 0);
    assert_eq!(visited, 2);

    // Both visited pages are queryable, the unvisited one is not
    assert_eq!(sink.query("alpha", 10).await.unwrap().len(), 1);
    assert_eq!(sink.query("bravo", 10).await.unwrap().len(), 1);
    assert!(sink.query("charlie", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_crawl_with_page_budget_of_one_fetches_only_seed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><head><title>Seed</title></head><body>
                <a href="/b">B</a>
                <a href="/c">C</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page("<html><body></body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html_page("<html><body></body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let (report, _sink, visited, _index_dir) = run_crawl(&server, crawl_options(5, 1)).await;

    assert_eq!(report.pages_indexed, 1);
    assert_eq!(visited, 1);
}

#[tokio::test]
async fn test_crawl_honors_robots_rules() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private\n"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
                <a href="/private/secret">Secret</a>
                <a href="/open">Open</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open"))
        .respond_with(html_page(
            "<html><body><p>public content</p></body></html>",
        ))
        .mount(&server)
        .await;

    // Disallowed pages must never reach the fetch step
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(html_page("<html><body><p>secret</p></body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let (report, sink, _visited, _index_dir) = run_crawl(&server, crawl_options(2, 100)).await;

    assert_eq!(report.pages_indexed, 2);
    assert_eq!(report.tasks_dropped, 1);
    assert!(sink.query("secret", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_crawl_survives_fetch_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
                <a href="/broken">Broken</a>
                <a href="/fine">Fine</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fine"))
        .respond_with(html_page("<html><body><p>still here</p></body></html>"))
        .mount(&server)
        .await;

    let (report, sink, _visited, _index_dir) = run_crawl(&server, crawl_options(2, 100)).await;

    assert_eq!(report.pages_indexed, 2);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(sink.query("still", 10).await.unwrap().len(), 1);
}
