//! HTTP client for product pages, fronted by the shared page cache.

mod headers;

use std::sync::Arc;
use std::time::Duration;

use pricecmp_core::AppConfig;
use reqwest::header;
use reqwest::Client;

use crate::cache::{product_cache_key, TtlCache};
use crate::error::ScraperError;
use crate::random::RandomSource;

pub use headers::USER_AGENTS;

/// Timeouts and pre-request jitter bounds for a [`FetchClient`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(10),
            min_delay_ms: 2000,
            max_delay_ms: 4000,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.scraper_request_timeout_secs),
            connect_timeout: Duration::from_secs(config.scraper_connect_timeout_secs),
            min_delay_ms: config.scraper_min_delay_ms,
            max_delay_ms: config.scraper_max_delay_ms,
        }
    }
}

/// Fetches raw product page HTML.
///
/// Every fetch consults the cache first. A miss sleeps a randomized jitter,
/// sends one GET with a rotated user agent and a browser-like header set,
/// and caches the body on success. Failures are classified into typed
/// errors and never retried here.
#[derive(Debug)]
pub struct FetchClient {
    client: Client,
    cache: Arc<TtlCache<String>>,
    random: Arc<dyn RandomSource>,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl FetchClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::HttpClient`] if the underlying
    /// `reqwest::Client` cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        config: &FetchConfig,
        cache: Arc<TtlCache<String>>,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ScraperError::HttpClient)?;

        Ok(Self {
            client,
            cache,
            random,
            min_delay_ms: config.min_delay_ms.min(config.max_delay_ms),
            max_delay_ms: config.max_delay_ms.max(config.min_delay_ms),
        })
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<TtlCache<String>> {
        &self.cache
    }

    /// Returns the page body for `url`, from cache when present.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::BotDetected`] on HTTP 403.
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UpstreamStatus`] on any other non-2xx status.
    /// - [`ScraperError::Timeout`] if the request exceeds its timeout.
    /// - [`ScraperError::Network`] for any other transport failure.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let cache_key = product_cache_key(url);
        if let Some(body) = self.cache.get(&cache_key) {
            tracing::debug!(url, "cache hit");
            return Ok(body);
        }

        let delay = self.jitter();
        tracing::debug!(url, delay_ms = delay.as_millis(), "cache miss; fetching");
        tokio::time::sleep(delay).await;

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.pick_user_agent())
            .header(header::ACCEPT, headers::ACCEPT)
            .header(header::ACCEPT_LANGUAGE, headers::ACCEPT_LANGUAGE)
            .header(header::ACCEPT_ENCODING, headers::ACCEPT_ENCODING)
            .header(header::CONNECTION, headers::CONNECTION)
            .header(
                header::UPGRADE_INSECURE_REQUESTS,
                headers::UPGRADE_INSECURE_REQUESTS,
            )
            .send()
            .await
            .map_err(|e| ScraperError::from_transport(url, e))?;

        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ScraperError::BotDetected {
                url: url.to_owned(),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScraperError::from_transport(url, e))?;

        self.cache.set(cache_key, body.clone());
        Ok(body)
    }

    /// Pre-request delay drawn from `min_delay_ms..=max_delay_ms`.
    fn jitter(&self) -> Duration {
        Duration::from_millis(
            self.random
                .uniform_inclusive(self.min_delay_ms, self.max_delay_ms),
        )
    }

    fn pick_user_agent(&self) -> &'static str {
        USER_AGENTS[self.random.index(USER_AGENTS.len())]
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
