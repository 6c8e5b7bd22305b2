//! Ordered selector lookups for a single product field.

use scraper::{ElementRef, Html, Selector};

use crate::parse::clean_text;

/// What a lookup reads from a matched element.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Source {
    /// Concatenated descendant text, whitespace-collapsed.
    Text,
    /// The named attribute, trimmed.
    Attr(&'static str),
}

#[derive(Debug)]
struct Lookup {
    selector: Selector,
    source: Source,
}

impl Lookup {
    fn read(&self, element: ElementRef<'_>) -> Option<String> {
        let value = match self.source {
            Source::Text => clean_text(&element.text().collect::<String>()),
            Source::Attr(name) => element.value().attr(name)?.trim().to_owned(),
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Selector lookups for one field, ranked from most to least specific.
///
/// Page markup drifts between A/B buckets and regional variants, so each
/// field carries several known shapes. The first lookup with a non-empty
/// value wins.
#[derive(Debug)]
pub(crate) struct FallbackChain {
    lookups: Vec<Lookup>,
}

impl FallbackChain {
    /// # Panics
    ///
    /// Panics if any entry of `selectors` is not valid CSS. Selector tables
    /// are compile-time constants, so this is a programming error.
    pub(crate) fn new(selectors: &[&str], source: Source) -> Self {
        let lookups = selectors
            .iter()
            .map(|css| Lookup {
                selector: Selector::parse(css)
                    .unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}")),
                source,
            })
            .collect();
        Self { lookups }
    }

    pub(crate) fn text(selectors: &[&str]) -> Self {
        Self::new(selectors, Source::Text)
    }

    pub(crate) fn attr(selectors: &[&str], name: &'static str) -> Self {
        Self::new(selectors, Source::Attr(name))
    }

    /// Value of the first element, across lookups in order, that yields a
    /// non-empty reading.
    pub(crate) fn first_match(&self, document: &Html) -> Option<String> {
        self.lookups.iter().find_map(|lookup| {
            document
                .select(&lookup.selector)
                .find_map(|element| lookup.read(element))
        })
    }
}
