//! Bitmap-to-vector tracing for inkvert.
//!
//! The engine seam is the [`Vectorizer`] trait: a preprocessed raster
//! plus a parameter bundle in, a complete `<svg>` document out. The
//! [`BuiltinEngine`] implements it with boundary walking, polygon
//! fitting and quadratic corner smoothing; a two-tone trace produces
//! one compound path, a posterized trace one path per tonal layer.
//!
//! Output is deterministic: identical raster bytes and parameters
//! always produce identical markup.

pub mod bitmap;
pub mod boundary;
pub mod fit;
pub mod params;
pub mod posterize;
pub mod svg_out;

use image::GrayImage;
use inkvert_pipeline::{ProcessingMode, RasterImage};

pub use params::{
    BW_PARAMS, Binarization, COLOR_PARAMS, EngineParams, FillStrategy, PosterizeParams,
    TraceParams, TurnPolicy,
};

/// Errors that can occur while tracing.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The raster bytes could not be decoded.
    #[error("failed to decode raster for tracing: {0}")]
    Decode(#[from] image::ImageError),

    /// The raster has no pixels.
    #[error("raster has zero area")]
    EmptyRaster,
}

/// A tracing engine.
///
/// Engines are substitutable behind this trait; callers never depend
/// on which implementation produced the markup, only on it being a
/// complete `<svg>` document.
pub trait Vectorizer: Send + Sync {
    /// Trace a preprocessed raster into SVG markup.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError`] if the raster cannot be decoded or has
    /// no pixels.
    fn vectorize(&self, raster: &RasterImage, params: &EngineParams)
    -> Result<String, TraceError>;
}

/// The built-in boundary-walking engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEngine;

impl Vectorizer for BuiltinEngine {
    fn vectorize(
        &self,
        raster: &RasterImage,
        params: &EngineParams,
    ) -> Result<String, TraceError> {
        let gray = image::load_from_memory(raster.bytes())?.to_luma8();
        if gray.width() == 0 || gray.height() == 0 {
            return Err(TraceError::EmptyRaster);
        }
        let markup = match params {
            EngineParams::Trace(p) => trace_mono(&gray, *p),
            EngineParams::Posterize(p) => trace_posterize(&gray, *p),
        };
        Ok(markup)
    }
}

/// Trace with the fixed parameter bundle for `mode`.
///
/// # Errors
///
/// Propagates any [`TraceError`] from the engine.
pub fn trace(
    engine: &dyn Vectorizer,
    raster: &RasterImage,
    mode: ProcessingMode,
) -> Result<String, TraceError> {
    engine.vectorize(raster, EngineParams::for_mode(mode))
}

fn trace_mono(gray: &GrayImage, params: params::TraceParams) -> String {
    let mut bm = bitmap::binarize(gray, params.binarization);
    let regions = boundary::decompose(&mut bm, params.turd_size, params.turn_policy);
    tracing::debug!(regions = regions.len(), "two-tone trace complete");
    let mut document = svg_out::base_document(gray.width(), gray.height());
    if !regions.is_empty() {
        let data = regions
            .iter()
            .map(|region| fit::path_data(&region.boundary, params.alpha_max, params.opt_tolerance))
            .collect::<Vec<_>>()
            .join(" ");
        document = document.add(svg_out::mono_path(data));
    }
    document.to_string()
}

fn trace_posterize(gray: &GrayImage, params: params::PosterizeParams) -> String {
    let layers = posterize::trace_layers(gray, &params);
    tracing::debug!(layers = layers.len(), "posterize trace complete");
    let mut document = svg_out::base_document(gray.width(), gray.height());
    for layer in layers {
        document = document.add(svg_out::layer_path(layer.data, layer.luma));
    }
    document.to_string()
}
