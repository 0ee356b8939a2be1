//! Width-capped downscaling.

use image::DynamicImage;
use image::imageops::FilterType;

/// Maximum width handed to the tracing engine, in pixels.
///
/// Tracing cost grows with pixel count while output quality plateaus
/// well below typical photo resolutions. Anything wider than this is
/// downscaled before filtering; narrower images are never upscaled.
pub const MAX_TRACE_WIDTH: u32 = 1600;

/// Downscale the image to at most `max_width` wide, preserving aspect
/// ratio. Returns the (possibly borrowed-then-cloned) image and
/// whether a downscale happened.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cap_width(image: &DynamicImage, max_width: u32) -> (DynamicImage, bool) {
    let width = image.width();
    if width <= max_width || max_width == 0 {
        return (image.clone(), false);
    }
    let height = image.height();
    // Round half up in integer space so the target size is exact and
    // platform independent.
    let target_height = ((u64::from(height) * u64::from(max_width) + u64::from(width) / 2)
        / u64::from(width))
    .max(1) as u32;
    (
        image.resize_exact(max_width, target_height, FilterType::Lanczos3),
        true,
    )
}
