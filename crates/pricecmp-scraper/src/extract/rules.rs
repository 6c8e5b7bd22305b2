//! Declarative, selector-table-driven extractor.

use pricecmp_core::Platform;
use scraper::Html;

use super::chain::FallbackChain;
use super::Extractor;
use crate::error::{MissingField, ScraperError};
use crate::parse::{is_in_stock, parse_price, parse_rating, parse_review_count};
use crate::types::ScrapedProduct;

/// Per-field CSS selector tables for one platform, most specific first.
#[derive(Debug, Clone, Copy)]
pub struct PlatformRules {
    pub platform: Platform,
    pub title: &'static [&'static str],
    pub price: &'static [&'static str],
    pub original_price: &'static [&'static str],
    /// Image elements; the URL is read from their `src` attribute.
    pub image: &'static [&'static str],
    pub rating: &'static [&'static str],
    pub review_count: &'static [&'static str],
    pub availability: &'static [&'static str],
    /// Lowercase phrases in the availability text that mean "not in stock".
    pub unavailable_keywords: &'static [&'static str],
}

/// [`Extractor`] built from a [`PlatformRules`] table.
#[derive(Debug)]
pub struct RuleExtractor {
    platform: Platform,
    title: FallbackChain,
    price: FallbackChain,
    original_price: FallbackChain,
    image: FallbackChain,
    rating: FallbackChain,
    review_count: FallbackChain,
    availability: FallbackChain,
    unavailable_keywords: &'static [&'static str],
}

impl RuleExtractor {
    /// # Panics
    ///
    /// Panics if any selector in `rules` is not valid CSS.
    #[must_use]
    pub fn new(rules: &PlatformRules) -> Self {
        Self {
            platform: rules.platform,
            title: FallbackChain::text(rules.title),
            price: FallbackChain::text(rules.price),
            original_price: FallbackChain::text(rules.original_price),
            image: FallbackChain::attr(rules.image, "src"),
            rating: FallbackChain::text(rules.rating),
            review_count: FallbackChain::text(rules.review_count),
            availability: FallbackChain::text(rules.availability),
            unavailable_keywords: rules.unavailable_keywords,
        }
    }

    fn missing(&self, url: &str, field: MissingField) -> ScraperError {
        ScraperError::Extraction {
            url: url.to_owned(),
            platform: self.platform,
            field,
        }
    }
}

impl Extractor for RuleExtractor {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn extract(&self, document: &Html, url: &str) -> Result<ScrapedProduct, ScraperError> {
        let title = self
            .title
            .first_match(document)
            .ok_or_else(|| self.missing(url, MissingField::Title))?;

        let price = self
            .price
            .first_match(document)
            .and_then(|text| parse_price(&text))
            .ok_or_else(|| self.missing(url, MissingField::Price))?;

        let original_price = self
            .original_price
            .first_match(document)
            .and_then(|text| parse_price(&text))
            .unwrap_or(price);

        let availability = self.availability.first_match(document).unwrap_or_default();

        Ok(ScrapedProduct {
            title,
            price: Some(price),
            original_price: Some(original_price),
            image_url: self.image.first_match(document),
            rating: self
                .rating
                .first_match(document)
                .and_then(|text| parse_rating(&text)),
            review_count: self
                .review_count
                .first_match(document)
                .and_then(|text| parse_review_count(&text)),
            in_stock: is_in_stock(&availability, self.unavailable_keywords),
            url: url.to_owned(),
            platform: self.platform,
        })
    }
}
