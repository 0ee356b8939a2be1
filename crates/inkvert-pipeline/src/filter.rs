//! Pixel filters applied between decode and re-encode.
//!
//! Each filter consumes and produces a [`DynamicImage`] so that chains
//! can be declared as plain slices and applied in order. Grayscale
//! images stay grayscale through every filter; color images stay RGBA
//! until an explicit [`FilterOp::Grayscale`] or [`FilterOp::Threshold`]
//! step collapses them.

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::filter::{gaussian_blur_f32, median_filter};

/// A single preprocessing filter step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Median filter over a square window, removing sensor speckle.
    Despeckle {
        /// Window radius in pixels; the window is `2r + 1` on a side.
        radius: u32,
    },
    /// Linear contrast stretch of the observed luminance range to the
    /// full `0..=255` range.
    Normalize,
    /// Collapse to single-channel luminance.
    Grayscale,
    /// Binary luminance threshold; pixels above `value` become white,
    /// the rest black.
    Threshold { value: u8 },
    /// Gaussian blur with the given sigma.
    Blur { sigma: f32 },
}

/// Apply a filter chain in declaration order.
#[must_use]
pub fn apply_chain(image: DynamicImage, chain: &[FilterOp]) -> DynamicImage {
    let mut current = image;
    for op in chain {
        current = apply(current, *op);
    }
    current
}

fn apply(image: DynamicImage, op: FilterOp) -> DynamicImage {
    match op {
        FilterOp::Despeckle { radius } => despeckle(&image, radius),
        FilterOp::Normalize => normalize(&image),
        FilterOp::Grayscale => DynamicImage::ImageLuma8(image.to_luma8()),
        FilterOp::Threshold { value } => {
            DynamicImage::ImageLuma8(threshold(&image.to_luma8(), value, ThresholdType::Binary))
        }
        FilterOp::Blur { sigma } => blur(&image, sigma),
    }
}

fn despeckle(image: &DynamicImage, radius: u32) -> DynamicImage {
    if radius == 0 {
        return image.clone();
    }
    match image {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(median_filter(gray, radius, radius))
        }
        other => DynamicImage::ImageRgba8(median_filter(&other.to_rgba8(), radius, radius)),
    }
}

/// Stretch the luminance range linearly so the darkest observed value
/// maps to 0 and the brightest to 255. Color images are remapped per
/// channel with the same luminance-derived scale; alpha is untouched.
/// A flat image (no range) is returned unchanged.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let mut lo = u8::MAX;
    let mut hi = u8::MIN;
    for pixel in gray.pixels() {
        let v = pixel.0[0];
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if hi <= lo {
        return image.clone();
    }
    let span = f32::from(hi - lo);
    let remap = move |v: u8| -> u8 {
        (f32::from(v.saturating_sub(lo)) * 255.0 / span)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    match image {
        DynamicImage::ImageLuma8(g) => DynamicImage::ImageLuma8(GrayImage::from_fn(
            g.width(),
            g.height(),
            |x, y| Luma([remap(g.get_pixel(x, y).0[0])]),
        )),
        other => {
            let rgba = other.to_rgba8();
            DynamicImage::ImageRgba8(RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
                Rgba([remap(r), remap(g), remap(b), a])
            }))
        }
    }
}

fn blur(image: &DynamicImage, sigma: f32) -> DynamicImage {
    if sigma <= 0.0 {
        return image.clone();
    }
    match image {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(gaussian_blur_f32(gray, sigma))
        }
        other => DynamicImage::ImageRgba8(blur_rgba(&other.to_rgba8(), sigma)),
    }
}

/// Gaussian blur for RGBA by blurring each channel independently.
fn blur_rgba(image: &RgbaImage, sigma: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let channel = |index: usize| -> GrayImage {
        let plane =
            GrayImage::from_fn(width, height, |x, y| Luma([image.get_pixel(x, y).0[index]]));
        gaussian_blur_f32(&plane, sigma)
    };
    let [r, g, b, a] = [channel(0), channel(1), channel(2), channel(3)];
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            r.get_pixel(x, y).0[0],
            g.get_pixel(x, y).0[0],
            b.get_pixel(x, y).0[0],
            a.get_pixel(x, y).0[0],
        ])
    })
}
