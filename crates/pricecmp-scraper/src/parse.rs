//! Free-form text normalization for scraped product fields.
//!
//! Product pages render numbers for humans: currency symbols, Indian and
//! Western digit grouping, trailing labels ("out of 5 stars",
//! "Ratings & Reviews"). These helpers use byte scanning to pull the first
//! meaningful number out of such text.

/// Collapses whitespace runs (including newlines) to single spaces and trims.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a displayed price into whole currency units.
///
/// Currency symbols, thousands separators and whitespace are ignored; the
/// first decimal number is rounded to the nearest unit. Returns `None` when
/// the text holds no digits, so a missing price is never mistaken for zero.
///
/// `"₹1,23,456"` → `Some(123_456)`, `"$12.99"` → `Some(13)`, `"abc"` → `None`.
#[must_use]
pub fn parse_price(text: &str) -> Option<u64> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let start = compact.find(|c: char| c.is_ascii_digit())?;
    let number = leading_decimal(&compact[start..]);
    let value = number.parse::<f64>().ok().filter(|v| v.is_finite())?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = value.round() as u64;
    Some(whole)
}

/// Parses a star rating and clamps it into `0.0..=5.0`.
///
/// Only the first number counts, so `"4.3 out of 5 stars"` → `Some(4.3)`.
/// A minus sign directly before that number is honoured (then clamped).
#[must_use]
pub fn parse_rating(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let number = leading_decimal(&text[start..]);
    let value = number.parse::<f64>().ok()?;
    let signed = if text[..start].ends_with('-') {
        -value
    } else {
        value
    };
    Some(signed.clamp(0.0, 5.0))
}

/// Parses a review or rating count, e.g. `"12,345 ratings"` → `Some(12_345)`.
///
/// Reads the first digit group (commas allowed inside it) so combined labels
/// like `"1,234 Ratings & 156 Reviews"` yield the first count only.
#[must_use]
pub fn parse_review_count(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse::<u64>().ok()
}

/// Derives stock status from an availability fragment.
///
/// In stock unless the lowercased text contains one of `unavailable_keywords`
/// (which must themselves be lowercase). Empty text means in stock.
#[must_use]
pub fn is_in_stock(availability: &str, unavailable_keywords: &[&str]) -> bool {
    let lower = availability.to_lowercase();
    !unavailable_keywords
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// Returns the longest prefix of `s` shaped like `digits[.digits]`.
/// `s` must start with an ASCII digit.
fn leading_decimal(s: &str) -> &str {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < len && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    &s[..i]
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
