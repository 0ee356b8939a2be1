//! Layered posterize tracing.
//!
//! The grayscale image is cut at evenly spaced luminance thresholds
//! into cumulative layers: the layer for cutoff `c` covers every pixel
//! with luminance at or below `c`. Layers are traced lightest first so
//! that when painted in document order each darker layer sits on top
//! of the lighter ones that contain it.

use image::GrayImage;

use crate::bitmap::Bitmap;
use crate::boundary;
use crate::fit;
use crate::params::{FillStrategy, PosterizeParams, TurnPolicy};

/// One traced tonal layer: fill luminance and SVG path data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Grayscale fill value.
    pub luma: u8,
    /// Path data covering the layer's regions.
    pub data: String,
}

/// Luminance cutoffs for `steps` layers, lightest (largest) first.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn layer_cutoffs(steps: u8) -> Vec<u8> {
    let steps = steps.max(1);
    (1..=u32::from(steps))
        .rev()
        .map(|k| (255 * k / (u32::from(steps) + 1)) as u8)
        .collect()
}

/// Fill luminance for the layer at `index` (0 = lightest).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn layer_fill(cutoff: u8, index: usize, steps: u8, strategy: FillStrategy) -> u8 {
    match strategy {
        FillStrategy::Cutoff => cutoff,
        FillStrategy::Spread => {
            let steps = usize::from(steps.max(1));
            let index = index.min(steps - 1);
            (255 * (steps - 1 - index) / steps) as u8
        }
    }
}

/// Trace every non-empty tonal layer of the image.
#[must_use]
pub fn trace_layers(gray: &GrayImage, params: &PosterizeParams) -> Vec<Layer> {
    let steps = params.steps.max(1);
    let mut layers = Vec::new();
    for (index, cutoff) in layer_cutoffs(steps).into_iter().enumerate() {
        let mut bitmap = Bitmap::from_gray(gray, cutoff);
        let regions = boundary::decompose(&mut bitmap, params.turd_size, TurnPolicy::Minority);
        if regions.is_empty() {
            continue;
        }
        let data = regions
            .iter()
            .map(|region| fit::path_data(&region.boundary, params.alpha_max, params.opt_tolerance))
            .collect::<Vec<_>>()
            .join(" ");
        layers.push(Layer {
            luma: layer_fill(cutoff, index, steps, params.fill),
            data,
        });
    }
    layers
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Luma;

    use super::*;

    fn params() -> PosterizeParams {
        PosterizeParams {
            steps: 12,
            fill: FillStrategy::Spread,
            alpha_max: 1.3,
            opt_tolerance: 0.18,
            turd_size: 2,
        }
    }

    #[test]
    fn cutoffs_are_descending_and_evenly_spaced() {
        let cutoffs = layer_cutoffs(12);
        assert_eq!(cutoffs.len(), 12);
        assert!(cutoffs.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(cutoffs[0], (255u32 * 12 / 13) as u8);
        assert_eq!(cutoffs[11], 255 / 13);
    }

    #[test]
    fn spread_fills_run_light_to_black() {
        let steps = 12;
        let first = layer_fill(235, 0, steps, FillStrategy::Spread);
        let last = layer_fill(19, 11, steps, FillStrategy::Spread);
        assert!(first > last);
        assert_eq!(last, 0);
    }

    #[test]
    fn cutoff_strategy_uses_threshold_value() {
        assert_eq!(layer_fill(117, 5, 12, FillStrategy::Cutoff), 117);
    }

    #[test]
    fn uniform_white_image_has_no_layers() {
        let gray = GrayImage::from_pixel(16, 16, Luma([255]));
        assert!(trace_layers(&gray, &params()).is_empty());
    }

    #[test]
    fn multi_tone_image_yields_multiple_layers() {
        let mut gray = GrayImage::from_pixel(20, 20, Luma([255]));
        for y in 0..20 {
            for x in 0..10 {
                gray.put_pixel(x, y, Luma([0]));
            }
            for x in 10..15 {
                gray.put_pixel(x, y, Luma([128]));
            }
        }
        let layers = trace_layers(&gray, &params());
        assert!(layers.len() > 1);
        // Lightest layer covers the most and comes first.
        assert!(layers[0].luma > layers[layers.len() - 1].luma);
        for layer in &layers {
            assert!(layer.data.contains('M'));
            assert!(layer.data.ends_with('Z'));
        }
    }

    #[test]
    fn zero_steps_is_clamped_to_one() {
        assert_eq!(layer_cutoffs(0).len(), 1);
    }
}
