//! Integration tests for `EmailExtractor` over real HTTP.
//!
//! Each test stands up a `wiremock` site. Paths without a mock answer 404.

use placescout_core::PageKind;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use placescout_scraper::{
    EmailExtractor, ExtractionStatus, ExtractorOptions, HttpFetcher, PageFetcher, CONTACT_PATHS,
};

const AGENT: &str = "placescout-test/0.1";

fn test_extractor() -> EmailExtractor<HttpFetcher> {
    let fetcher = HttpFetcher::new(5, AGENT).expect("failed to build test HttpFetcher");
    let options = ExtractorOptions {
        user_agent: AGENT.to_string(),
        ..ExtractorOptions::default()
    };
    EmailExtractor::new(fetcher, options)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(format!("<html><body>{body}</body></html>"))
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn finds_email_on_contact_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<h1>Corner Cafe</h1>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html(r#"<a href="mailto:hello@cornercafe.com">Email us</a>"#))
        .mount(&server)
        .await;

    let result = test_extractor().extract(&server.uri()).await;

    assert_eq!(result.status, ExtractionStatus::Found, "got: {result:?}");
    assert_eq!(result.email.as_deref(), Some("hello@cornercafe.com"));
    assert_eq!(result.source.map(|s| s.page), Some(PageKind::ContactPath));
    assert_eq!(result.pages_fetched, 2);
}

#[tokio::test]
async fn fetcher_sends_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("user-agent", AGENT))
        .respond_with(html("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(5, AGENT).expect("failed to build test HttpFetcher");
    let url = reqwest::Url::parse(&format!("{}/", server.uri())).expect("valid server url");
    let result = fetcher.fetch(&url).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

// ---------------------------------------------------------------------------
// robots.txt
// ---------------------------------------------------------------------------

#[tokio::test]
async fn robots_disallowed_contact_page_is_not_fetched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /contact\n"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<h1>Corner Cafe</h1>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("<p>hidden@cornercafe.com</p>"))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<p>owner@cornercafe.com</p>"))
        .mount(&server)
        .await;

    let result = test_extractor().extract(&server.uri()).await;

    assert_eq!(result.email.as_deref(), Some("owner@cornercafe.com"));
    assert_eq!(result.source.map(|s| s.page), Some(PageKind::ContactPath));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_everywhere_is_fetch_failed() {
    let server = MockServer::start().await;

    let result = test_extractor().extract(&server.uri()).await;

    assert_eq!(result.status, ExtractionStatus::FetchFailed);
    assert!(result.email.is_none());
    assert_eq!(result.pages_fetched, 1 + CONTACT_PATHS.len());
    let err = result.last_error.unwrap_or_default();
    assert!(err.contains("404"), "expected a 404 error, got: {err}");
}

#[tokio::test]
async fn unreachable_host_is_fetch_failed_after_root() {
    let result = test_extractor().extract("http://127.0.0.1:1").await;

    assert_eq!(result.status, ExtractionStatus::FetchFailed);
    assert_eq!(result.pages_fetched, 1);
    assert!(result.last_error.is_some());
}

#[tokio::test]
async fn server_error_page_is_not_scanned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<p>oops@cornercafe.com</p>"))
        .mount(&server)
        .await;

    let result = test_extractor().extract(&server.uri()).await;

    assert!(result.email.is_none(), "got: {result:?}");
    assert_eq!(result.status, ExtractionStatus::FetchFailed);
}
