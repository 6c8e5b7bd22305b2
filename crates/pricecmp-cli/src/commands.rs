//! Command handlers for the CLI.
//!
//! Both handlers print a single JSON document to stdout; logs go to stderr.

use std::sync::Arc;

use pricecmp_core::AppConfig;
use pricecmp_scraper::{classify, extract_product_id, ExtractorRegistry, Scraper, TtlCache};

/// Largest batch accepted by `scrape`.
pub(crate) const MAX_BATCH_URLS: usize = 10;

/// Rejects empty batches and batches above [`MAX_BATCH_URLS`].
pub(crate) fn check_batch_size(urls: &[String]) -> anyhow::Result<()> {
    if urls.is_empty() {
        anyhow::bail!("at least one URL is required");
    }
    if urls.len() > MAX_BATCH_URLS {
        anyhow::bail!(
            "too many URLs: got {}, maximum is {MAX_BATCH_URLS}",
            urls.len()
        );
    }
    Ok(())
}

/// Builds the JSON report for `classify`. No network I/O.
pub(crate) fn classify_report(url: &str) -> anyhow::Result<serde_json::Value> {
    let platform = classify(url)?;
    let supported = ExtractorRegistry::with_defaults().supports(platform);

    Ok(serde_json::json!({
        "url": url,
        "platform": platform,
        "displayName": platform.display_name(),
        "baseUrl": platform.base_url(),
        "productId": extract_product_id(url, platform),
        "supported": supported,
    }))
}

/// Print the platform and product id of `url`.
///
/// # Errors
///
/// Returns an error if `url` is malformed or belongs to no known platform.
pub(crate) fn run_classify(url: &str) -> anyhow::Result<()> {
    let report = classify_report(url)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Scrape every URL and print the batch outcome.
///
/// Per-URL failures are part of the printed outcome, not errors.
///
/// # Errors
///
/// Returns an error if the batch size is out of range, the scraper cannot
/// be built, or the outcome cannot be serialized.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    cache: Arc<TtlCache<String>>,
    urls: &[String],
) -> anyhow::Result<()> {
    check_batch_size(urls)?;

    let scraper = Scraper::from_app_config(config, cache)
        .map_err(|e| anyhow::anyhow!("failed to build scraper: {e}"))?;

    let outcome = scraper.scrape_many(urls).await;
    let stats = scraper.cache().stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, keys = stats.keys, "page cache");

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
