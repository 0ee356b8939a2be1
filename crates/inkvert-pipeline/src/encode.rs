//! Lossless PNG hand-off to the tracing engine.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageReader};

use crate::types::{Dimensions, PreprocessError};

/// Encode the preprocessed image as PNG.
///
/// PNG is the only interchange format used between preprocessing and
/// tracing: lossless, so the filter chain's output survives exactly.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut bytes = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut bytes))
        .map_err(PreprocessError::Encode)?;
    Ok(bytes)
}

/// Read dimensions back from encoded bytes.
///
/// The re-read size, not any earlier bookkeeping, is what downstream
/// metadata reports.
pub fn read_dimensions(bytes: &[u8]) -> Result<Dimensions, PreprocessError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(Dimensions { width, height })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn encoded_dimensions_round_trip() {
        let image =
            DynamicImage::ImageLuma8(GrayImage::from_pixel(31, 17, Luma([9])));
        let bytes = encode_png(&image).unwrap();
        let dims = read_dimensions(&bytes).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 31,
                height: 17
            }
        );
    }

    #[test]
    fn encoded_bytes_are_png() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([0])));
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn read_dimensions_rejects_garbage() {
        assert!(read_dimensions(&[1, 2, 3, 4]).is_err());
    }
}
