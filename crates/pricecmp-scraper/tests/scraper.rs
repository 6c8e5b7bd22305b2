//! Integration tests for the `Scraper` pipeline.
//!
//! Classification is by host, so these tests address real marketplace URLs
//! and pre-populate the page cache instead of hitting the network. Anything
//! that would reach the network uses a host the classifier rejects first.

use std::sync::Arc;
use std::time::Duration;

use pricecmp_scraper::{
    product_cache_key, ErrorKind, ExtractorRegistry, FetchClient, FetchConfig, FixedRandom,
    Platform, Scraper, ScraperError, TtlCache,
};

const AMAZON_URL: &str = "https://www.amazon.in/Apple-iPhone-15/dp/B0CHX1W1XY";
const FLIPKART_URL: &str = "https://www.flipkart.com/apple-iphone-15/p/itm6ac6485515ae4";
const EBAY_URL: &str = "https://www.ebay.com/itm/1234567890";

const AMAZON_PAGE: &str = include_str!("fixtures/amazon_product.html");
const AMAZON_NO_PRICE: &str = include_str!("fixtures/amazon_no_price.html");
const FLIPKART_PAGE: &str = include_str!("fixtures/flipkart_product.html");

/// Builds a scraper whose cache already holds `pages` as `(url, html)`.
fn scraper_with_pages(pages: &[(&str, &str)]) -> Scraper {
    let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));
    for (url, html) in pages {
        cache.set(product_cache_key(url), (*html).to_owned());
    }
    let config = FetchConfig {
        min_delay_ms: 0,
        max_delay_ms: 0,
        ..FetchConfig::default()
    };
    let client = FetchClient::new(&config, cache, Arc::new(FixedRandom::new(0, 0)))
        .expect("failed to build test FetchClient");
    Scraper::new(client, ExtractorRegistry::with_defaults())
}

// ---------------------------------------------------------------------------
// scrape_one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scrape_one_extracts_cached_amazon_page() {
    let scraper = scraper_with_pages(&[(AMAZON_URL, AMAZON_PAGE)]);

    let product = scraper.scrape_one(AMAZON_URL).await.unwrap();

    assert_eq!(product.platform, Platform::Amazon);
    assert_eq!(product.price, Some(129_900));
    assert_eq!(product.url, AMAZON_URL);
    assert_eq!(scraper.cache().stats().hits, 1);
}

#[tokio::test]
async fn scrape_one_rejects_malformed_url() {
    let scraper = scraper_with_pages(&[]);
    let err = scraper.scrape_one("not a url").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
}

#[tokio::test]
async fn scrape_one_rejects_unknown_host() {
    let scraper = scraper_with_pages(&[]);
    let err = scraper.scrape_one(EBAY_URL).await.unwrap_err();
    assert!(
        matches!(err, ScraperError::UnsupportedPlatform { ref url } if url == EBAY_URL),
        "expected UnsupportedPlatform, got: {err:?}"
    );
}

#[tokio::test]
async fn recognised_platform_without_extractor_fails_before_fetch() {
    let scraper = scraper_with_pages(&[]);
    let url = "https://www.myntra.com/tshirts/roadster/12345/buy";

    let err = scraper.scrape_one(url).await.unwrap_err();

    assert!(
        matches!(
            err,
            ScraperError::PlatformNotImplemented {
                platform: Platform::Myntra,
                ..
            }
        ),
        "expected PlatformNotImplemented, got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::PlatformNotImplemented);
    let stats = scraper.cache().stats();
    assert_eq!(stats.hits + stats.misses, 0, "cache must not be consulted");
}

#[tokio::test]
async fn scrape_one_surfaces_extraction_failure() {
    let scraper = scraper_with_pages(&[(AMAZON_URL, AMAZON_NO_PRICE)]);
    let err = scraper.scrape_one(AMAZON_URL).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionError);
    assert!(!err.kind().is_retriable());
}

// ---------------------------------------------------------------------------
// scrape_many
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_isolates_failures_from_successes() {
    let scraper = scraper_with_pages(&[(AMAZON_URL, AMAZON_PAGE), (FLIPKART_URL, FLIPKART_PAGE)]);

    let outcome = scraper
        .scrape_many(&[AMAZON_URL, EBAY_URL, FLIPKART_URL])
        .await;

    assert_eq!(outcome.successes.len(), 2);
    assert_eq!(outcome.failures.len(), 1);

    let mut platforms: Vec<Platform> = outcome.successes.iter().map(|p| p.platform).collect();
    platforms.sort_by_key(|p| p.display_name());
    assert_eq!(platforms, vec![Platform::Amazon, Platform::Flipkart]);

    let failure = &outcome.failures[0];
    assert_eq!(failure.url, EBAY_URL);
    assert_eq!(failure.kind, ErrorKind::UnsupportedPlatform);
    assert!(!failure.error.is_empty());
}

#[tokio::test]
async fn batch_reports_every_failure_kind() {
    let scraper = scraper_with_pages(&[(AMAZON_URL, AMAZON_NO_PRICE)]);

    let outcome = scraper
        .scrape_many(&[
            AMAZON_URL.to_owned(),
            "::bad::".to_owned(),
            "https://www.ajio.com/p/469581234".to_owned(),
        ])
        .await;

    assert!(outcome.successes.is_empty());
    let mut kinds: Vec<ErrorKind> = outcome.failures.iter().map(|f| f.kind).collect();
    kinds.sort_by_key(|k| format!("{k:?}"));
    assert_eq!(
        kinds,
        vec![
            ErrorKind::ExtractionError,
            ErrorKind::InvalidUrl,
            ErrorKind::PlatformNotImplemented,
        ]
    );
}

#[tokio::test]
async fn batch_with_concurrency_ceiling_still_settles_all() {
    let scraper = scraper_with_pages(&[(AMAZON_URL, AMAZON_PAGE), (FLIPKART_URL, FLIPKART_PAGE)])
        .with_max_concurrent(Some(1));

    let outcome = scraper
        .scrape_many(&[FLIPKART_URL, EBAY_URL, AMAZON_URL])
        .await;

    assert_eq!(outcome.successes.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
}

#[tokio::test]
async fn empty_batch_is_empty_outcome() {
    let scraper = scraper_with_pages(&[]);
    let outcome = scraper.scrape_many::<&str>(&[]).await;
    assert!(outcome.successes.is_empty());
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn batch_outcome_serializes_camel_case() {
    let scraper = scraper_with_pages(&[(AMAZON_URL, AMAZON_PAGE)]);
    let outcome = scraper.scrape_many(&[AMAZON_URL]).await;

    let json = serde_json::to_value(&outcome).unwrap();
    let product = &json["successes"][0];
    assert_eq!(product["originalPrice"], 134_900);
    assert_eq!(product["inStock"], true);
    assert_eq!(product["reviewCount"], 1024);
}
