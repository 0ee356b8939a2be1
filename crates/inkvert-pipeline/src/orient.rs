//! Decoding with orientation metadata honored.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};

use crate::types::PreprocessError;

/// Decode image bytes and bake any embedded orientation metadata into
/// the pixel data.
///
/// Cameras frequently store sensor-native pixels plus a rotation tag;
/// applying the tag here means every later stage sees upright pixels
/// and the reported dimensions match what a viewer would show. Inputs
/// without orientation metadata pass through untouched.
pub fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, PreprocessError> {
    if bytes.is_empty() {
        return Err(PreprocessError::EmptyInput);
    }
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}
