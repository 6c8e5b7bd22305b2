use pricecmp_core::Platform;
use serde::Serialize;
use thiserror::Error;

/// Mandatory product fields whose absence fails an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Title,
    Price,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Title => write!(f, "title"),
            MissingField::Price => write!(f, "price"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported platform for {url}; use an Amazon, Flipkart, Myntra, Snapdeal, or Ajio URL")]
    UnsupportedPlatform { url: String },

    #[error("{platform} scraping is not implemented yet ({url})")]
    PlatformNotImplemented { url: String, platform: Platform },

    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("access forbidden by {url}: possible bot detection")]
    BotDetected { url: String },

    #[error("product not found: {url}")]
    NotFound { url: String },

    #[error("failed to extract product {field} from {platform} page {url}")]
    Extraction {
        url: String,
        platform: Platform,
        field: MissingField,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Coarse classification of a [`ScraperError`] for callers deciding whether
/// to retry, skip, or surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidUrl,
    UnsupportedPlatform,
    PlatformNotImplemented,
    NetworkError,
    Timeout,
    BotDetected,
    NotFound,
    ExtractionError,
}

impl ErrorKind {
    /// Returns `true` for transient kinds a caller may reasonably retry.
    ///
    /// Nothing in this crate retries on its own; this only informs callers.
    #[must_use]
    pub fn is_retriable(self) -> bool {
        matches!(self, ErrorKind::NetworkError | ErrorKind::Timeout)
    }
}

impl ScraperError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScraperError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ScraperError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            ScraperError::PlatformNotImplemented { .. } => ErrorKind::PlatformNotImplemented,
            ScraperError::Network { .. }
            | ScraperError::UpstreamStatus { .. }
            | ScraperError::HttpClient(_) => ErrorKind::NetworkError,
            ScraperError::Timeout { .. } => ErrorKind::Timeout,
            ScraperError::BotDetected { .. } => ErrorKind::BotDetected,
            ScraperError::NotFound { .. } => ErrorKind::NotFound,
            ScraperError::Extraction { .. } => ErrorKind::ExtractionError,
        }
    }

    /// Classifies a transport failure from `reqwest` into a timeout or a
    /// generic network error.
    pub(crate) fn from_transport(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ScraperError::Timeout {
                url: url.to_owned(),
            }
        } else {
            ScraperError::Network {
                url: url.to_owned(),
                source,
            }
        }
    }
}
