//! Integration tests for `FetchClient::fetch`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made. Jitter is pinned to zero through `FixedRandom`.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricecmp_scraper::client::USER_AGENTS;
use pricecmp_scraper::{
    product_cache_key, ErrorKind, FetchClient, FetchConfig, FixedRandom, ScraperError, TtlCache,
};

fn test_config() -> FetchConfig {
    FetchConfig {
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(5),
        min_delay_ms: 0,
        max_delay_ms: 0,
    }
}

/// Builds a `FetchClient` with no jitter, a fresh cache and the given UA index.
fn test_client(ua_index: usize) -> FetchClient {
    FetchClient::new(
        &test_config(),
        Arc::new(TtlCache::default()),
        Arc::new(FixedRandom::new(0, ua_index)),
    )
    .expect("failed to build test FetchClient")
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Success and caching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_returns_body_and_populates_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0OK"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(0);
    let url = format!("{}/dp/B0OK", server.uri());

    let first = client.fetch(&url).await.unwrap();
    let second = client.fetch(&url).await.unwrap();

    assert_eq!(first, "<html>ok</html>");
    assert_eq!(second, first, "second fetch must come from cache");
    assert!(client.cache().has(&product_cache_key(&url)));
    // `.expect(1)` is verified when `server` drops.
}

#[tokio::test]
async fn sends_browser_like_headers_with_pooled_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/itm1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = test_client(3);
    client
        .fetch(&format!("{}/p/itm1", server.uri()))
        .await
        .unwrap();

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    assert_eq!(header("user-agent").as_deref(), Some(USER_AGENTS[3]));
    assert_eq!(header("accept-language").as_deref(), Some("en-US,en;q=0.9"));
    assert_eq!(header("accept-encoding").as_deref(), Some("gzip, deflate, br"));
    assert_eq!(header("upgrade-insecure-requests").as_deref(), Some("1"));
    assert!(header("accept").is_some_and(|v| v.starts_with("text/html")));
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forbidden_maps_to_bot_detected() {
    let server = MockServer::start().await;
    mount_status(&server, "/dp/B0BLOCK", 403).await;

    let client = test_client(0);
    let url = format!("{}/dp/B0BLOCK", server.uri());
    let err = client.fetch(&url).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::BotDetected { ref url } if url.ends_with("/dp/B0BLOCK")),
        "expected BotDetected, got: {err:?}"
    );
    assert!(!client.cache().has(&product_cache_key(&url)), "failures are never cached");
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    mount_status(&server, "/dp/B0GONE", 404).await;

    let err = test_client(0)
        .fetch(&format!("{}/dp/B0GONE", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::NotFound { .. }),
        "expected NotFound, got: {err:?}"
    );
    assert!(!err.kind().is_retriable());
}

#[tokio::test]
async fn server_error_is_a_network_error() {
    let server = MockServer::start().await;
    mount_status(&server, "/dp/B0DOWN", 503).await;

    let err = test_client(0)
        .fetch(&format!("{}/dp/B0DOWN", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::UpstreamStatus { status: 503, .. }),
        "expected UpstreamStatus(503), got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::NetworkError);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0SLOW"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = FetchConfig {
        request_timeout: Duration::from_millis(300),
        ..test_config()
    };
    let client = FetchClient::new(
        &config,
        Arc::new(TtlCache::default()),
        Arc::new(FixedRandom::new(0, 0)),
    )
    .unwrap();

    let err = client
        .fetch(&format!("{}/dp/B0SLOW", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::Timeout { .. }),
        "expected Timeout, got: {err:?}"
    );
    assert!(err.kind().is_retriable());
}

#[tokio::test]
async fn expired_cache_entry_triggers_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/B0TTL"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(0);
    let url = format!("{}/dp/B0TTL", server.uri());
    client
        .cache()
        .set_with_ttl(product_cache_key(&url), "stale".to_owned(), Duration::ZERO);

    assert_eq!(client.fetch(&url).await.unwrap(), "fresh");
}
