//! Amazon (`amazon.in`, `amazon.com`) product detail pages.

use pricecmp_core::Platform;

use super::rules::PlatformRules;

pub const AMAZON_RULES: PlatformRules = PlatformRules {
    platform: Platform::Amazon,
    title: &["#productTitle", "h1.a-size-large", "span#productTitle"],
    price: &[
        ".a-price-whole",
        "#priceblock_ourprice",
        "#priceblock_dealprice",
        ".a-price .a-offscreen",
    ],
    original_price: &[".a-text-price .a-offscreen", "#priceblock_saleprice"],
    image: &["#landingImage", "#imgBlkFront", ".a-dynamic-image"],
    rating: &["span.a-icon-alt", ".a-star-4-5 .a-icon-alt"],
    review_count: &[
        "#acrCustomerReviewText",
        r#"span[data-hook="total-review-count"]"#,
    ],
    availability: &["#availability"],
    unavailable_keywords: &["out of stock", "currently unavailable", "unavailable"],
};
