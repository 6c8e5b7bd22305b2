//! Maps product URLs onto the platform that hosts them.

use pricecmp_core::Platform;
use reqwest::Url;

use crate::error::ScraperError;

/// Returns `true` if `url` parses as an absolute URL.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Matches `host` case-insensitively against each platform's hostname
/// fragments in priority order. First match wins.
#[must_use]
pub fn detect_platform(host: &str) -> Option<Platform> {
    let host = host.to_ascii_lowercase();
    Platform::ALL.into_iter().find(|platform| {
        platform
            .host_fragments()
            .iter()
            .any(|fragment| host.contains(fragment))
    })
}

/// Classifies a product URL by its host.
///
/// Path, query and fragment never influence the result.
///
/// # Errors
///
/// - [`ScraperError::InvalidUrl`] if `url` does not parse or has no host.
/// - [`ScraperError::UnsupportedPlatform`] if the host matches no platform.
pub fn classify(url: &str) -> Result<Platform, ScraperError> {
    let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;

    let host = parsed.host_str().ok_or_else(|| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: "URL has no host".to_owned(),
    })?;

    detect_platform(host).ok_or_else(|| ScraperError::UnsupportedPlatform {
        url: url.to_owned(),
    })
}
