//! Platform-native product identifiers parsed out of product URLs.

use std::sync::LazyLock;

use pricecmp_core::Platform;
use regex::Regex;
use reqwest::Url;

static AMAZON_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:dp|gp/product)/([A-Z0-9]+)").expect("valid amazon id regex"));

static FLIPKART_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/p/([^/?]+)").expect("valid flipkart id regex"));

/// Extracts the platform's product identifier from `url`.
///
/// - Amazon: the ASIN after `/dp/` or `/gp/product/`.
/// - Flipkart: the item id after `/p/`.
///
/// Falls back to the URL path when no identifier pattern matches (and for
/// platforms without a known pattern), and to the input string when `url`
/// does not parse.
#[must_use]
pub fn extract_product_id(url: &str, platform: Platform) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_owned();
    };
    let path = parsed.path();

    let pattern = match platform {
        Platform::Amazon => Some(&*AMAZON_ID),
        Platform::Flipkart => Some(&*FLIPKART_ID),
        Platform::Myntra | Platform::Snapdeal | Platform::Ajio => None,
    };

    pattern
        .and_then(|re| re.captures(path))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| path.to_owned(), |m| m.as_str().to_owned())
}
