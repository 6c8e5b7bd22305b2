//! Multi-platform product page scraping with an in-process page cache.
//!
//! [`Scraper`] is the entry point: it classifies each URL by host, fetches
//! the page through [`FetchClient`] (which consults the shared [`TtlCache`]
//! first), and hands the HTML to the platform's [`Extractor`].

pub mod cache;
pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod parse;
pub mod product_id;
pub mod random;
pub mod types;

pub use cache::{product_cache_key, search_cache_key, CacheStats, TtlCache};
pub use classify::{classify, detect_platform, is_valid_url};
pub use client::{FetchClient, FetchConfig};
pub use error::{ErrorKind, MissingField, ScraperError};
pub use extract::{Extractor, ExtractorRegistry};
pub use orchestrator::Scraper;
pub use pricecmp_core::Platform;
pub use product_id::extract_product_id;
pub use random::{FixedRandom, RandomSource, ThreadRandom};
pub use types::{BatchOutcome, ScrapeFailure, ScrapedProduct};
