//! Page collaborator — the rendered document as seen by the extractors.

/// Read-only view over the live listing page.
///
/// The browser binding implements this over `web-sys`; tests use plain structs.
pub trait PageView {
    /// Current navigation path (e.g. `window.location.pathname`).
    fn location_path(&self) -> String;

    /// Text content of the price-display node, or `None` while it is not rendered.
    fn price_text(&self) -> Option<String>;

    /// Whether the anchor region the chart is inserted after exists yet.
    fn has_anchor(&self) -> bool;
}

impl<P: PageView + ?Sized> PageView for &P {
    fn location_path(&self) -> String {
        (**self).location_path()
    }

    fn price_text(&self) -> Option<String> {
        (**self).price_text()
    }

    fn has_anchor(&self) -> bool {
        (**self).has_anchor()
    }
}
