//! SVG markup repair and path counting.
//!
//! Tracing engines are treated as black boxes: whatever markup they
//! emit is repaired here into a standalone, embeddable document. The
//! repairs are presence-based and idempotent — markup that already
//! carries a namespace, a `viewBox` and explicit dimensions passes
//! through byte-identical, so normalizing twice never differs from
//! normalizing once.

use inkvert_pipeline::Dimensions;

/// The SVG XML namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A normalized SVG document and its path count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    markup: String,
    path_count: usize,
}

impl VectorDocument {
    /// The normalized markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Consume the document, returning the markup.
    #[must_use]
    pub fn into_markup(self) -> String {
        self.markup
    }

    /// Number of `<path` elements in the markup.
    #[must_use]
    pub const fn path_count(&self) -> usize {
        self.path_count
    }
}

/// Repair engine markup into a standalone document and count its
/// paths.
///
/// Three independent checks, each a substring presence test on the
/// whole markup, each repaired by injecting attributes right after
/// the first `<svg`:
///
/// 1. no `xmlns=` anywhere: inject the SVG namespace;
/// 2. no `viewBox=` anywhere: inject `viewBox="0 0 {w} {h}"`;
/// 3. no `width=` anywhere: inject `width="{w}" height="{h}"`.
///
/// Later injections land closer to the tag name, so the final
/// attribute order is width/height, viewBox, xmlns. Dimensions come
/// from the preprocessed raster, never parsed out of the markup.
#[must_use]
pub fn normalize(markup: &str, dimensions: Dimensions) -> VectorDocument {
    let Dimensions { width, height } = dimensions;
    let mut repaired = markup.to_owned();
    if !repaired.contains("xmlns=") {
        repaired = repaired.replacen("<svg", &format!("<svg xmlns=\"{SVG_NS}\""), 1);
    }
    if !repaired.contains("viewBox=") {
        repaired = repaired.replacen("<svg", &format!("<svg viewBox=\"0 0 {width} {height}\""), 1);
    }
    if !repaired.contains("width=") {
        repaired = repaired.replacen(
            "<svg",
            &format!("<svg width=\"{width}\" height=\"{height}\""),
            1,
        );
    }
    let path_count = repaired.matches("<path").count();
    VectorDocument {
        markup: repaired,
        path_count,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DIMS: Dimensions = Dimensions {
        width: 640,
        height: 480,
    };

    #[test]
    fn complete_markup_passes_through_unchanged() {
        let markup = "<svg width=\"640\" height=\"480\" viewBox=\"0 0 640 480\" \
                      xmlns=\"http://www.w3.org/2000/svg\"><path d=\"M 0 0 Z\"/></svg>";
        let doc = normalize(markup, DIMS);
        assert_eq!(doc.markup(), markup);
        assert_eq!(doc.path_count(), 1);
    }

    #[test]
    fn normalize_is_idempotent() {
        let bare = "<svg><path d=\"M 0 0 Z\"/></svg>";
        let once = normalize(bare, DIMS);
        let twice = normalize(once.markup(), DIMS);
        assert_eq!(once, twice);
    }

    #[test]
    fn bare_svg_gains_all_three_repairs() {
        let doc = normalize("<svg></svg>", DIMS);
        let markup = doc.markup();
        assert!(markup.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(markup.contains("viewBox=\"0 0 640 480\""));
        assert!(markup.contains("width=\"640\""));
        assert!(markup.contains("height=\"480\""));
        // Later injections land first: width/height, then viewBox,
        // then xmlns.
        let width_at = markup.find("width=").unwrap();
        let view_box_at = markup.find("viewBox=").unwrap();
        let xmlns_at = markup.find("xmlns=").unwrap();
        assert!(width_at < view_box_at);
        assert!(view_box_at < xmlns_at);
    }

    #[test]
    fn only_missing_attributes_are_injected() {
        let markup = "<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>";
        let doc = normalize(markup, DIMS);
        assert_eq!(doc.markup().matches("xmlns=").count(), 1);
        assert!(doc.markup().contains("viewBox=\"0 0 640 480\""));
        assert!(doc.markup().contains("width=\"640\""));
    }

    #[test]
    fn path_count_counts_every_path_element() {
        let markup = "<svg><path d=\"M 0 0 Z\"/><path d=\"M 1 1 Z\"/><rect/></svg>";
        assert_eq!(normalize(markup, DIMS).path_count(), 2);
    }

    #[test]
    fn markup_without_svg_tag_is_left_alone() {
        let doc = normalize("<div>not svg</div>", DIMS);
        assert_eq!(doc.markup(), "<div>not svg</div>");
        assert_eq!(doc.path_count(), 0);
    }
}
