//! Single-URL pipeline and concurrent batch fan-out.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use pricecmp_core::AppConfig;

use crate::cache::TtlCache;
use crate::classify::classify;
use crate::client::{FetchClient, FetchConfig};
use crate::error::ScraperError;
use crate::extract::ExtractorRegistry;
use crate::random::ThreadRandom;
use crate::types::{BatchOutcome, ScrapeFailure, ScrapedProduct};

/// Classifies, fetches and extracts product pages.
///
/// Holds no per-request state; share one instance for the life of the
/// process so every scrape goes through the same page cache.
#[derive(Debug)]
pub struct Scraper {
    client: FetchClient,
    registry: ExtractorRegistry,
    max_concurrent: Option<usize>,
}

impl Scraper {
    /// Creates a scraper with no batch concurrency ceiling.
    #[must_use]
    pub fn new(client: FetchClient, registry: ExtractorRegistry) -> Self {
        Self {
            client,
            registry,
            max_concurrent: None,
        }
    }

    /// Caps how many URLs of one batch are in flight at once. `None` (the
    /// default) starts every URL immediately.
    #[must_use]
    pub fn with_max_concurrent(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent = limit;
        self
    }

    /// Builds a production scraper: thread RNG, built-in extractors,
    /// timeouts and concurrency from `config`, pages cached in `cache`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_app_config(
        config: &AppConfig,
        cache: Arc<TtlCache<String>>,
    ) -> Result<Self, ScraperError> {
        let client = FetchClient::new(
            &FetchConfig::from_app_config(config),
            cache,
            Arc::new(ThreadRandom),
        )?;
        Ok(Self::new(client, ExtractorRegistry::with_defaults())
            .with_max_concurrent(config.max_concurrent_urls()))
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<TtlCache<String>> {
        self.client.cache()
    }

    #[must_use]
    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Scrapes one product URL.
    ///
    /// Platforms without a registered extractor are rejected before any
    /// network I/O. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the first failure along classify → fetch → extract.
    pub async fn scrape_one(&self, url: &str) -> Result<ScrapedProduct, ScraperError> {
        let platform = classify(url)?;

        if !self.registry.supports(platform) {
            return Err(ScraperError::PlatformNotImplemented {
                url: url.to_owned(),
                platform,
            });
        }

        let html = self.client.fetch(url).await?;
        let product = self.registry.extract(platform, &html, url)?;

        tracing::debug!(url, %platform, price = ?product.price, "scraped product");
        Ok(product)
    }

    /// Scrapes every URL concurrently and settles them all.
    ///
    /// A failure on one URL never cancels or affects the others; each is
    /// recorded in [`BatchOutcome::failures`]. Results are collected in
    /// completion order, not input order.
    pub async fn scrape_many<S>(&self, urls: &[S]) -> BatchOutcome
    where
        S: AsRef<str>,
    {
        let limit = self.max_concurrent.unwrap_or(urls.len()).max(1);

        let results: Vec<(&str, Result<ScrapedProduct, ScraperError>)> =
            stream::iter(urls.iter().map(S::as_ref))
                .map(|url| async move { (url, self.scrape_one(url).await) })
                .buffer_unordered(limit)
                .collect()
                .await;

        let mut outcome = BatchOutcome::default();
        for (url, result) in results {
            match result {
                Ok(product) => outcome.successes.push(product),
                Err(err) => {
                    tracing::warn!(url, kind = ?err.kind(), error = %err, "scrape failed");
                    outcome.failures.push(ScrapeFailure::new(url, &err));
                }
            }
        }

        tracing::info!(
            total = urls.len(),
            succeeded = outcome.successes.len(),
            failed = outcome.failures.len(),
            "batch scrape finished"
        );
        outcome
    }
}
