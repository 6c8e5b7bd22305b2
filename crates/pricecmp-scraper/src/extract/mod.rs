//! Platform-specific product extraction and the registry that dispatches to it.

mod amazon;
mod chain;
mod flipkart;
mod rules;

use std::collections::HashMap;
use std::sync::Arc;

use pricecmp_core::Platform;
use scraper::Html;

use crate::error::ScraperError;
use crate::types::ScrapedProduct;

pub use amazon::AMAZON_RULES;
pub use flipkart::FLIPKART_RULES;
pub use rules::{PlatformRules, RuleExtractor};

/// Turns a parsed product page into a [`ScrapedProduct`].
///
/// Implementations must be pure: the same document and URL always produce
/// the same result.
pub trait Extractor: Send + Sync {
    fn platform(&self) -> Platform;

    /// # Errors
    ///
    /// Returns [`ScraperError::Extraction`] when the title or price cannot
    /// be found.
    fn extract(&self, document: &Html, url: &str) -> Result<ScrapedProduct, ScraperError>;
}

/// Maps each platform to its extractor. Built once at startup.
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<Platform, Arc<dyn Extractor>>,
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}

impl ExtractorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in extractor (Amazon, Flipkart).
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RuleExtractor::new(&AMAZON_RULES));
        registry.register(RuleExtractor::new(&FLIPKART_RULES));
        registry
    }

    /// Adds `extractor` under its own platform, returning any extractor it
    /// replaced.
    pub fn register<E>(&mut self, extractor: E) -> Option<Arc<dyn Extractor>>
    where
        E: Extractor + 'static,
    {
        self.extractors
            .insert(extractor.platform(), Arc::new(extractor))
    }

    #[must_use]
    pub fn supports(&self, platform: Platform) -> bool {
        self.extractors.contains_key(&platform)
    }

    /// Registered platforms in classification priority order.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.supports(*p))
            .collect()
    }

    /// Parses `raw_html` and runs the extractor registered for `platform`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::PlatformNotImplemented`] if no extractor is registered.
    /// - Any error from the extractor itself.
    pub fn extract(
        &self,
        platform: Platform,
        raw_html: &str,
        url: &str,
    ) -> Result<ScrapedProduct, ScraperError> {
        let extractor =
            self.extractors
                .get(&platform)
                .ok_or_else(|| ScraperError::PlatformNotImplemented {
                    url: url.to_owned(),
                    platform,
                })?;

        let document = Html::parse_document(raw_html);
        extractor.extract(&document, url)
    }
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
