//! Mode-tuned raster preprocessing for inkvert.
//!
//! Turns an uploaded image (PNG, JPEG or WEBP) into a tracer-ready
//! PNG: decode with orientation applied, cap the width, run the
//! mode's filter chain, re-encode losslessly. The crate is sans-IO —
//! bytes in, bytes out — so it can run on any worker thread.
//!
//! ```no_run
//! use inkvert_pipeline::{preprocess, ProcessingMode};
//!
//! # fn main() -> Result<(), inkvert_pipeline::PreprocessError> {
//! let upload = std::fs::read("logo.png").map_err(inkvert_pipeline::PreprocessError::Io)?;
//! let raster = preprocess(&upload, ProcessingMode::Bw)?;
//! assert!(raster.dimensions().width <= 1600);
//! # Ok(())
//! # }
//! ```

pub mod encode;
pub mod filter;
pub mod mode;
pub mod orient;
pub mod resize;
pub mod types;

pub use filter::FilterOp;
pub use mode::{ProcessingMode, UnknownMode};
pub use resize::MAX_TRACE_WIDTH;
pub use types::{Dimensions, PreprocessError, RasterImage};

/// Run the full preprocessing pipeline for one upload.
///
/// # Errors
///
/// Returns [`PreprocessError`] if the input is empty, cannot be
/// decoded, or the intermediate image cannot be re-encoded.
pub fn preprocess(bytes: &[u8], mode: ProcessingMode) -> Result<RasterImage, PreprocessError> {
    // 1. Decode, honoring embedded orientation metadata.
    let image = orient::decode_oriented(bytes)?;
    let (source_width, source_height) = (image.width(), image.height());

    // 2. Cap the width; never upscale.
    let (image, downscaled) = resize::cap_width(&image, resize::MAX_TRACE_WIDTH);

    // 3. Mode-specific filter chain.
    let image = filter::apply_chain(image, mode.filters());

    // 4. Lossless re-encode; the re-read size is authoritative.
    let png = encode::encode_png(&image)?;
    let dimensions = encode::read_dimensions(&png)?;

    tracing::debug!(
        mode = mode.as_str(),
        source_width,
        source_height,
        width = dimensions.width,
        height = dimensions.height,
        downscaled,
        "preprocessed upload"
    );
    Ok(RasterImage::new(png, dimensions))
}
