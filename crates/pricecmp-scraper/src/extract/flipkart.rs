//! Flipkart product detail pages.
//!
//! Flipkart ships hashed class names that rotate with frontend releases;
//! older names stay in each chain until they stop appearing.

use pricecmp_core::Platform;

use super::rules::PlatformRules;

pub const FLIPKART_RULES: PlatformRules = PlatformRules {
    platform: Platform::Flipkart,
    title: &["span.VU-ZEz", "span.B_NuCI", "h1.yhB1nd", ".B_NuCI"],
    price: &[".Nx9bqj.CxhGGd", "._30jeq3._16Jk6d", "._30jeq3"],
    // The current list-price class is literally `A6+E6v`; `+` must be escaped.
    original_price: &[r".yRaY8j.A6\+E6v", "._3I9_wc._27UcVY", "._3I9_wc"],
    image: &["._396cs4._2amPTt._3qGmMb", "img._2r_T1I", "img._396cs4"],
    rating: &[".XQDdHH", "div._3LWZlK"],
    review_count: &["span._2_R_DZ", "span.Wphh3N"],
    availability: &["._16FRp0"],
    unavailable_keywords: &["out of stock", "sold out", "currently unavailable"],
};
