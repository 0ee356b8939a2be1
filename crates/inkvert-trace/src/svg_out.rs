//! SVG document assembly for traced output.
//!
//! The `svg` crate writes attributes in sorted order, so documents
//! built here are byte-stable across runs.

use svg::Document;
use svg::node::element::Path;

/// Root `<svg>` element carrying the namespace, pixel size and a
/// matching `viewBox`.
#[must_use]
pub fn base_document(width: u32, height: u32) -> Document {
    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height))
}

/// The single black compound path of a two-tone trace. Holes are cut
/// by the even-odd fill rule rather than by subpath orientation.
#[must_use]
pub fn mono_path(data: String) -> Path {
    Path::new()
        .set("d", data)
        .set("fill", "black")
        .set("fill-rule", "evenodd")
        .set("stroke", "none")
}

/// One grayscale posterize layer.
#[must_use]
pub fn layer_path(data: String, luma: u8) -> Path {
    Path::new()
        .set("d", data)
        .set("fill", format!("rgb({luma},{luma},{luma})"))
        .set("fill-rule", "evenodd")
        .set("stroke", "none")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_document_carries_namespace_and_size() {
        let markup = base_document(640, 480).to_string();
        assert!(markup.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(markup.contains("width=\"640\""));
        assert!(markup.contains("height=\"480\""));
        assert!(markup.contains("viewBox=\"0 0 640 480\""));
    }

    #[test]
    fn document_output_is_stable() {
        let a = base_document(10, 20)
            .add(mono_path("M 0 0 L 1 0 L 1 1 Z".to_owned()))
            .to_string();
        let b = base_document(10, 20)
            .add(mono_path("M 0 0 L 1 0 L 1 1 Z".to_owned()))
            .to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn layer_path_fill_is_grayscale() {
        let markup = base_document(4, 4)
            .add(layer_path("M 0 0 Z".to_owned(), 212))
            .to_string();
        assert!(markup.contains("fill=\"rgb(212,212,212)\""));
    }
}
