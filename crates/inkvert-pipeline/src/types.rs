//! Shared types for the inkvert preprocessing pipeline.

use serde::{Deserialize, Serialize};

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A preprocessed raster image, PNG-encoded.
///
/// Produced by [`crate::preprocess`] and consumed by the tracing
/// engine. The `dimensions` are read back from the encoded bytes and
/// are the authoritative size for all downstream metadata — after a
/// conditional downscale they differ from the upload's intrinsic size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    png: Vec<u8>,
    dimensions: Dimensions,
}

impl RasterImage {
    /// Create a raster image from PNG bytes and their dimensions.
    #[must_use]
    pub const fn new(png: Vec<u8>, dimensions: Dimensions) -> Self {
        Self { png, dimensions }
    }

    /// The PNG-encoded pixel data.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    /// The authoritative dimensions of the encoded image.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

/// Errors that can occur during raster preprocessing.
///
/// Any failure aborts the pipeline for that request; no partial or
/// fallback output is produced. The underlying `image` crate message
/// is preserved for diagnosability at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Reading the input bytes failed.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Failed to encode the preprocessed intermediate image.
    #[error("failed to encode intermediate image: {0}")]
    Encode(image::ImageError),
}
