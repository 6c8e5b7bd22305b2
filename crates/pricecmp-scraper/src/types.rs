//! Normalized product records and batch results.

use pricecmp_core::Platform;
use serde::Serialize;

use crate::error::{ErrorKind, ScraperError};

/// Commerce data extracted from a single product page.
///
/// A value of this type always has a non-empty `title` and a `Some` price;
/// extractors refuse to build one otherwise. Every other field is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProduct {
    pub title: String,
    /// Current selling price in whole currency units.
    pub price: Option<u64>,
    /// List price before discount. Equal to `price` when the page shows none.
    pub original_price: Option<u64>,
    pub image_url: Option<String>,
    /// Star rating clamped to `0.0..=5.0`.
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub in_stock: bool,
    pub url: String,
    pub platform: Platform,
}

/// One URL of a batch that could not be scraped.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeFailure {
    pub url: String,
    pub kind: ErrorKind,
    /// Human-readable reason, suitable for showing to an end user.
    pub error: String,
}

impl ScrapeFailure {
    pub(crate) fn new(url: &str, err: &ScraperError) -> Self {
        Self {
            url: url.to_owned(),
            kind: err.kind(),
            error: err.to_string(),
        }
    }
}

/// Settled result of a batch scrape.
///
/// Neither collection follows input order; match records back to inputs by
/// `url`.
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub successes: Vec<ScrapedProduct>,
    pub failures: Vec<ScrapeFailure>,
}
