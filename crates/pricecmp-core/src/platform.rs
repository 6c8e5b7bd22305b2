//! Supported e-commerce platforms and their static metadata.

use serde::{Deserialize, Serialize};

/// An e-commerce source site whose product pages can be classified.
///
/// Declaration order is the classifier's priority order: when a host matches
/// fragments of more than one platform, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    Flipkart,
    Myntra,
    Snapdeal,
    Ajio,
}

impl Platform {
    /// Every platform, in classification priority order.
    pub const ALL: [Platform; 5] = [
        Platform::Amazon,
        Platform::Flipkart,
        Platform::Myntra,
        Platform::Snapdeal,
        Platform::Ajio,
    ];

    /// Lowercase hostname fragments that identify this platform.
    #[must_use]
    pub fn host_fragments(self) -> &'static [&'static str] {
        match self {
            Platform::Amazon => &["amazon.in", "amazon.com"],
            Platform::Flipkart => &["flipkart.com"],
            Platform::Myntra => &["myntra.com"],
            Platform::Snapdeal => &["snapdeal.com"],
            Platform::Ajio => &["ajio.com"],
        }
    }

    /// Human-facing platform name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::Flipkart => "Flipkart",
            Platform::Myntra => "Myntra",
            Platform::Snapdeal => "Snapdeal",
            Platform::Ajio => "Ajio",
        }
    }

    /// Storefront root used when building links back to the platform.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Platform::Amazon => "https://www.amazon.in",
            Platform::Flipkart => "https://www.flipkart.com",
            Platform::Myntra => "https://www.myntra.com",
            Platform::Snapdeal => "https://www.snapdeal.com",
            Platform::Ajio => "https://www.ajio.com",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
