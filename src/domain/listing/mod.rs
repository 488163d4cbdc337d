//! Listing domain — identity and price extraction from the rendered page.

pub mod page;

use crate::shared::{ListingId, Price};

pub use page::PageView;

/// Structural pattern for listing paths:
/// `/<category>/<kind>/<slug>/id-<digits>`.
///
/// The match may start anywhere in the path and anything after the digits is
/// ignored. Category and the `id-` marker compare ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPattern {
    category: String,
}

impl Default for ListingPattern {
    fn default() -> Self {
        Self::new("vente")
    }
}

impl ListingPattern {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.trim_matches('/').to_ascii_lowercase(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Extract `<slug>/id-<digits>` from a navigation path.
    pub fn extract(&self, path: &str) -> Option<ListingId> {
        let needle = format!("/{}/", self.category);
        // ASCII lowering keeps byte offsets aligned with `path`.
        let lowered = path.to_ascii_lowercase();

        let mut from = 0;
        while let Some(rel) = lowered.get(from..).and_then(|s| s.find(&needle)) {
            let start = from + rel;
            if let Some(id) = capture_listing(&path[start + needle.len()..]) {
                return Some(id);
            }
            from = start + 1;
        }
        None
    }
}

fn capture_listing(rest: &str) -> Option<ListingId> {
    let mut segments = rest.splitn(3, '/');
    segments.next().filter(|kind| !kind.is_empty())?;
    let slug = segments.next().filter(|slug| !slug.is_empty())?;
    let tail = segments.next()?;

    let marker = tail.get(..3)?;
    if !marker.eq_ignore_ascii_case("id-") {
        return None;
    }
    let digits = tail[3..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    Some(ListingId::new(format!("{}/{}", slug, &tail[..3 + digits])))
}

/// Identity of the listing currently shown by `page`.
pub fn current_identity(pattern: &ListingPattern, page: &impl PageView) -> Option<ListingId> {
    pattern.extract(&page.location_path())
}

/// Price currently displayed by `page`, if the node is rendered and readable.
pub fn current_price(page: &impl PageView) -> Option<Price> {
    page.price_text()
        .as_deref()
        .and_then(Price::from_display_text)
}
